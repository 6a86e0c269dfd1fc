//! Damage intake + смерть + destroy countdown
//!
//! Любой урон идёт через `DamageRequest` (атаки монстров, горение, хост).
//! Удар от другой сущности делает её целью монстра.

use bevy::prelude::*;

use crate::ai::{AiState, Brain};
use crate::components::{Health, Monster, Navigation, Temperament};

/// Через сколько секунд после смерти монстр удаляется
pub const DESTROY_DELAY: f32 = 1.0;

/// Запрос: нанести урон
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: u32,
    /// `None`: урон от окружения (огонь)
    pub instigator: Option<Entity>,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub target: Entity,
    pub instigator: Option<Entity>,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент: монстр мертв, идёт destroy countdown
///
/// AI, восприятие и бой для него не работают; физика продолжает оседание.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Dying {
    pub elapsed: f32,
}

/// Реакция монстра на удар: цель = обидчик, состояние по темпераменту
pub fn react_to_hit(temperament: Temperament, brain: &mut Brain, state: &mut AiState, instigator: Entity) {
    brain.target = Some(instigator);
    *state = match temperament {
        Temperament::Skittish => AiState::Escaping,
        Temperament::Hostile => AiState::Chasing,
    };
}

/// Система: apply damage от DamageRequest
///
/// 1. Применяем damage к Health (мертвых пропускаем)
/// 2. Монстр запоминает обидчика
/// 3. DamageDealt / EntityDied, монстру: Dying
pub fn apply_damage(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    mut victims: Query<
        (
            &mut Health,
            Option<&Monster>,
            Option<&mut Brain>,
            Option<&mut AiState>,
            Option<&mut Navigation>,
        ),
        Without<Dying>,
    >,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
) {
    for request in requests.read() {
        let Ok((mut health, monster, brain, state, navigation)) = victims.get_mut(request.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        health.take_damage(request.amount);
        let target_died = !health.is_alive();

        // Урон от себя/окружения цель не меняет
        let instigator = request.instigator.filter(|&source| source != request.target);
        if let (Some(monster), Some(instigator), Some(mut brain), Some(mut state)) =
            (monster, instigator, brain, state)
        {
            react_to_hit(monster.kind.temperament(), &mut brain, &mut state, instigator);
        }

        dealt.write(DamageDealt {
            target: request.target,
            instigator: request.instigator,
            damage: request.amount,
            target_died,
        });

        if target_died {
            died.write(EntityDied {
                entity: request.target,
                killer: instigator,
            });

            if monster.is_some() {
                commands.entity(request.target).insert(Dying::default());
                if let Some(mut navigation) = navigation {
                    navigation.stop();
                }
            }

            crate::log_info(&format!("Entity {:?} killed by {:?}", request.target, instigator));
        }
    }
}

/// Система: destroy countdown мертвых монстров
///
/// Despawn, когда с момента смерти прошло больше `DESTROY_DELAY`.
pub fn advance_destroy_countdown(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut dying: Query<(Entity, &mut Dying, Option<&mut Brain>)>,
) {
    let dt = time.delta_secs();

    for (entity, mut countdown, brain) in dying.iter_mut() {
        countdown.elapsed += dt;
        if countdown.elapsed <= DESTROY_DELAY {
            continue;
        }

        if let Some(mut brain) = brain {
            brain.target = None;
        }
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn();
        }
        crate::log(&format!("Monster {:?} destroyed", entity));
    }
}
