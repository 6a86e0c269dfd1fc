//! Physics simulation module
//!
//! Kinematic интегратор монстров: gravity, трение, коллизии через
//! воксельный tracer (`world::cast_ray`). Позицию меняет только
//! `ReplicationState::relocate`, поэтому каждое движение помечает dirty.

use bevy::prelude::*;

pub mod movement;

// Re-export основных типов
pub use movement::{integrate, integrate_monsters, GRAVITY, SURFACE_OFFSET, TRACE_STEPS};

use crate::MonsterTick;

/// Physics Plugin
///
/// Порядок выполнения (MonsterTick::Physics):
/// 1. integrate_monsters: скорость → позиция
/// 2. face_destination: ориентация по оставшемуся пути
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (integrate_monsters, crate::movement::face_destination)
                .chain()
                .in_set(MonsterTick::Physics),
        );
    }
}
