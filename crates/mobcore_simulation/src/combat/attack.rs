//! Attack throttle монстра
//!
//! Накопитель растёт на Δt × attack_rate; атака, когда он перевалил порог.
//! Частота атак не зависит от частоты тиков.

use bevy::prelude::*;

use crate::ai::Brain;
use crate::components::CombatStats;

/// Порог накопителя атаки
pub const ATTACK_THRESHOLD: f32 = 3.0;

/// Один тик атаки. Возвращает цель, если удар состоялся.
///
/// Без цели накопитель растёт, но удара нет.
pub fn attack(brain: &mut Brain, stats: &CombatStats, dt: f32) -> Option<Entity> {
    brain.attack_interval += dt * stats.attack_rate;

    let target = brain.target?;
    if brain.attack_interval > ATTACK_THRESHOLD {
        brain.attack_interval = 0.0;
        return Some(target);
    }
    None
}
