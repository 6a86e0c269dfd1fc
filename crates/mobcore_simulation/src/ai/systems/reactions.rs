//! Perception systems: скан игроков → PerceptionEvent → переходы FSM.

use bevy::prelude::*;

use crate::ai::perception::{acquire_target, validate_target, Candidate, Sighting};
use crate::ai::{lose_player, see_player, AiState, Brain, PerceptionEvent};
use crate::combat::Dying;
use crate::components::{CombatStats, Health, Monster, Player, WorldPosition};
use crate::world::WorldQuery;

/// Система: восприятие монстров
///
/// Idle → acquire target (bounded scan). Остальные состояния → validate
/// текущей цели; отсутствующая, despawned или мёртвая (health 0) цель = потеря.
pub fn perceive_players(
    world: Res<WorldQuery>,
    monsters: Query<(Entity, &WorldPosition, &AiState, &Brain, &CombatStats), (With<Monster>, Without<Dying>)>,
    entities: Query<(Entity, &WorldPosition, Has<Player>, Option<&Health>)>,
    mut events: EventWriter<PerceptionEvent>,
) {
    // Порядок скана = порядок спавна (Entity::index)
    let mut candidates: Vec<Candidate> = entities
        .iter()
        .map(|(entity, position, is_player, health)| (entity, position.0, is_player && is_living(health)))
        .collect();
    candidates.sort_by_key(|(entity, _, _)| entity.index());

    for (monster, position, state, brain, stats) in monsters.iter() {
        match state {
            AiState::Idle => {
                let others = candidates.iter().copied().filter(|(entity, _, _)| *entity != monster);
                match acquire_target(&**world, position.0, stats.sight_distance, others) {
                    Sighting::Saw(player) => {
                        events.write(PerceptionEvent::SawPlayer { monster, player });
                    }
                    Sighting::Lost => {
                        events.write(PerceptionEvent::LostPlayer { monster });
                    }
                    Sighting::Nothing => {}
                }
            }
            _ => {
                let target = brain
                    .target
                    .and_then(|target| entities.get(target).ok())
                    .filter(|(_, _, _, health)| is_living(*health))
                    .map(|(_, target_position, _, _)| target_position.0);

                if !validate_target(&**world, position.0, stats.sight_distance, target) {
                    events.write(PerceptionEvent::LostPlayer { monster });
                }
            }
        }
    }
}

/// Без Health сущность считается живой
fn is_living(health: Option<&Health>) -> bool {
    health.is_none_or(Health::is_alive)
}

/// Система: применяет PerceptionEvent к AiState/Brain
pub fn react_to_perception(
    mut events: EventReader<PerceptionEvent>,
    mut monsters: Query<(&mut AiState, &mut Brain), Without<Dying>>,
) {
    for event in events.read() {
        match *event {
            PerceptionEvent::SawPlayer { monster, player } => {
                let Ok((mut state, mut brain)) = monsters.get_mut(monster) else {
                    continue;
                };
                see_player(&mut brain, &mut state, player);
                crate::log(&format!("👁️ {:?} sees player {:?} → Chasing", monster, player));
            }
            PerceptionEvent::LostPlayer { monster } => {
                let Ok((mut state, mut brain)) = monsters.get_mut(monster) else {
                    continue;
                };
                let previous = *state;
                if let Some(target) = lose_player(&mut brain, &mut state) {
                    crate::log(&format!(
                        "👻 {:?} lost {:?} ({} → Idle)",
                        monster, target, previous
                    ));
                }
            }
        }
    }
}
