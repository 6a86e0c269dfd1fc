//! Debug: листинг всех монстров
//!
//! Диагностика, не часть поведения. `&mut World` на время перечисления
//! и есть "lock" реестра сущностей.

use bevy::prelude::*;

use crate::ai::AiState;
use crate::components::{CombatStats, Monster};

#[derive(Debug, Clone, PartialEq)]
pub struct MonsterReport {
    pub entity: Entity,
    pub state: &'static str,
    pub mob_type: u8,
    pub attack_rate: f32,
}

/// Все живые (и умирающие) монстры в порядке спавна, с записью в лог
pub fn list_monsters(world: &mut World) -> Vec<MonsterReport> {
    let mut query = world.query::<(Entity, &Monster, &AiState, &CombatStats)>();
    let mut reports: Vec<MonsterReport> = query
        .iter(world)
        .map(|(entity, monster, state, stats)| MonsterReport {
            entity,
            state: state.name(),
            mob_type: monster.kind.type_id(),
            attack_rate: stats.attack_rate,
        })
        .collect();
    reports.sort_by_key(|report| report.entity.index());

    for report in &reports {
        crate::log_info(&format!(
            "{:?} In state: {} type: {} attack rate: {}",
            report.entity, report.state, report.mob_type, report.attack_rate
        ));
    }

    reports
}
