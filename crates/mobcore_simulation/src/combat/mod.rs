//! Combat system module
//!
//! ECS ответственность:
//! - Attack throttle монстров (attack)
//! - Damage intake: Health, реакция на обидчика (apply_damage)
//! - Смерть: Dying → destroy countdown → despawn
//! - Loot при смерти (PickupSpawn для хоста)
//!
//! Events: DamageRequest → DamageDealt / EntityDied → PickupSpawn

use bevy::prelude::*;

pub mod attack;
pub mod damage;
pub mod loot;

#[cfg(test)]
mod damage_tests;

// Re-export основных типов
pub use attack::{attack, ATTACK_THRESHOLD};
pub use damage::{
    advance_destroy_countdown, apply_damage, react_to_hit, DamageDealt, DamageRequest, Dying,
    EntityDied, DESTROY_DELAY,
};
pub use loot::{drop_item, drop_loot_on_death, loot_table, random_drop, ItemKind, LootEntry, PickupSpawn};

use crate::MonsterTick;

/// Combat Plugin
///
/// Порядок выполнения:
/// 1. advance_destroy_countdown: despawn мертвых (MonsterTick::Lifecycle)
/// 2. apply_damage: DamageRequest → Health (MonsterTick::Damage)
/// 3. drop_loot_on_death: EntityDied → PickupSpawn
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<PickupSpawn>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            advance_destroy_countdown.in_set(MonsterTick::Lifecycle),
        )
        .add_systems(
            FixedUpdate,
            (apply_damage, drop_loot_on_death)
                .chain() // Последовательное выполнение
                .in_set(MonsterTick::Damage),
        );
    }
}
