//! ECS Components для сущностей мира монстров
//!
//! Организация по доменам:
//! - actor: позиция, здоровье, маркер игрока (WorldPosition, Health, Player)
//! - monster: вид и tunables монстра (Monster, MobKind, CombatStats)
//! - movement: тело, навигация, ориентация (MobBody, Navigation, Orientation)
//!
//! AI (AiState, MetaState, Brain, Burn) живёт в `crate::ai`,
//! dirty-флаги репликации: в `crate::replication`.

pub mod actor;
pub mod monster;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use monster::*;
pub use movement::*;
