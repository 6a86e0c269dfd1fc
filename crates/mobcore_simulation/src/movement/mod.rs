//! Movement domain: навигация монстров
//!
//! Содержит:
//! - steer (Navigation → горизонтальная скорость + прыжок)
//! - face_destination (ориентация выводится из направления на destination)
//!
//! Компоненты (Navigation, MobBody, Orientation) живут в `crate::components`.

use bevy::prelude::*;

pub mod steering;

pub use steering::*;

use crate::MonsterTick;

/// Movement Plugin: steering до физики (MonsterTick::Motion)
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, steer_monsters.in_set(MonsterTick::Motion));
    }
}
