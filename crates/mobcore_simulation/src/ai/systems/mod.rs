//! AI systems (perception, FSM, burning)

pub mod burning;
pub mod fsm;
pub mod reactions;

// Re-export all systems
pub use burning::*;
pub use fsm::*;
pub use reactions::*;
