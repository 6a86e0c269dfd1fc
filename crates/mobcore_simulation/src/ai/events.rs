//! AI Events: результаты восприятия для FSM
//!
//! Perception (ray casts по вокселям) → PerceptionEvent → react_to_perception

use bevy::prelude::*;

/// События восприятия монстра
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PerceptionEvent {
    /// Игрок в радиусе и в прямой видимости (первый найденный)
    SawPlayer {
        monster: Entity,
        player: Entity,
    },

    /// Цель потеряна: далеко, за стеной, despawned или скан упёрся в лимит
    LostPlayer {
        monster: Entity,
    },
}
