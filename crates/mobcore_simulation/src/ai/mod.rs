//! AI decision-making module
//!
//! FSM монстров: поведенческое состояние (Idle/Chasing/Escaping/Attacking)
//! × мета-состояние (Normal/Burning). Восприятие через воксельный tracer,
//! погоня: через `Pursuit` конкретного вида.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod perception;
pub mod pursuit;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::PerceptionEvent;
pub use pursuit::{pursuit_for, Indifferent, Pursuit, PursuitContext, Stalker};

use crate::MonsterTick;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. perceive_players: скан/проверка цели (MonsterTick::Perception)
/// 2. react_to_perception: see/lose player → AiState
/// 3. tick_burning: горение, урон от огня (MonsterTick::Decision)
/// 4. run_state_machines: блуждание, погоня, бегство, атака
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PerceptionEvent>();

        app.add_systems(
            FixedUpdate,
            (systems::perceive_players, systems::react_to_perception)
                .chain()
                .in_set(MonsterTick::Perception),
        )
        .add_systems(
            FixedUpdate,
            (systems::tick_burning, systems::run_state_machines)
                .chain() // Последовательное выполнение для детерминизма
                .in_set(MonsterTick::Decision),
        );
    }
}
