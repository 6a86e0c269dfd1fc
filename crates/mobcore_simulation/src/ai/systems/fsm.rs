//! FSM AI systems (per-state поведение каждый тик).

use bevy::prelude::*;
use rand::Rng;

use crate::ai::pursuit::{pursuit_for, PursuitContext};
use crate::ai::{AiState, Brain};
use crate::combat::{attack, DamageRequest, Dying};
use crate::components::{CombatStats, Monster, Navigation, WorldPosition};
use crate::world::{VoxelWorld, WorldQuery};
use crate::DeterministicRng;

/// Idle: раз в столько секунд решаем, идти ли куда-нибудь
pub const IDLE_INTERVAL: f32 = 1.0;
/// Случайный сдвиг блуждания по каждой оси: [-5, 5]
pub const WANDER_RADIUS: i32 = 5;
/// Высота точки блуждания над землёй
pub const WANDER_HEIGHT_OFFSET: f32 = 1.2;

/// Idle: случайное блуждание.
///
/// Два независимых броска: d6 (идём при ≥ 3) и сдвиг по x/z.
pub fn wander(
    world: &dyn VoxelWorld,
    position: Vec3,
    brain: &mut Brain,
    navigation: &mut Navigation,
    rng: &mut impl Rng,
    dt: f32,
) {
    brain.idle_timer += dt;
    if brain.idle_timer <= IDLE_INTERVAL {
        return;
    }
    brain.idle_timer = 0.0;

    let roll = rng.gen_range(1..=6);
    let offset = Vec3::new(
        rng.gen_range(-WANDER_RADIUS..=WANDER_RADIUS) as f32,
        0.0,
        rng.gen_range(-WANDER_RADIUS..=WANDER_RADIUS) as f32,
    );

    if offset.length_squared() > 2.0 && roll >= 3 {
        let x = position.x + offset.x;
        let z = position.z + offset.z;
        let y = world.height_at(x.floor() as i32, z.floor() as i32) as f32 + WANDER_HEIGHT_OFFSET;
        navigation.move_to(Vec3::new(x, y, z));
    }
}

/// Escaping: точка на sight_distance дальше от цели по x и по z
pub fn escape_destination(position: Vec3, threat: Vec3, sight_distance: f32) -> Vec3 {
    let away = |own: f32, other: f32| {
        if other < own {
            own + sight_distance
        } else {
            own - sight_distance
        }
    };
    Vec3::new(away(position.x, threat.x), position.y, away(position.z, threat.z))
}

/// Система: поведение текущего состояния для всех живых монстров
pub fn run_state_machines(
    world: Res<WorldQuery>,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut monsters: Query<
        (
            Entity,
            &Monster,
            &WorldPosition,
            &CombatStats,
            &mut AiState,
            &mut Brain,
            &mut Navigation,
        ),
        Without<Dying>,
    >,
    positions: Query<&WorldPosition>,
    mut damage: EventWriter<DamageRequest>,
) {
    let dt = time.delta_secs();

    for (entity, monster, position, stats, mut state, mut brain, mut navigation) in monsters.iter_mut() {
        let target_position = brain
            .target
            .and_then(|target| positions.get(target).ok())
            .map(|target| target.0);

        let current = *state;
        match current {
            AiState::Idle => {
                wander(&**world, position.0, &mut brain, &mut navigation, &mut rng.rng, dt);
            }
            AiState::Chasing => {
                let mut ctx = PursuitContext {
                    position: position.0,
                    target: target_position,
                    stats,
                    state: &mut *state,
                    navigation: &mut *navigation,
                };
                pursuit_for(monster.kind).pursue(&mut ctx);
            }
            AiState::Escaping => match target_position {
                Some(threat) => {
                    navigation.move_to(escape_destination(position.0, threat, stats.sight_distance));
                }
                None => {
                    *state = AiState::Idle;
                }
            },
            AiState::Attacking => match target_position {
                Some(target) if (target - position.0).length() <= stats.attack_range => {
                    if let Some(victim) = attack(&mut brain, stats, dt) {
                        damage.write(DamageRequest {
                            target: victim,
                            amount: stats.attack_damage as u32,
                            instigator: Some(entity),
                        });
                    }
                }
                _ => {
                    *state = AiState::Chasing;
                }
            },
        }
    }
}
