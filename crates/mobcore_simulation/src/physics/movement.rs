//! Kinematic интегратор монстра против воксельного мира
//!
//! Порядок за тик:
//! 1. Ground check (+ выталкивание из блока, если застряли)
//! 2. Трение на земле (с dead-zone)
//! 3. Gravity в воздухе
//! 4. Перемещение с коллизией (tracer на 2 блока вдоль скорости)
//!
//! Детерминизм: fixed timestep, без случайности.

use bevy::prelude::*;

use crate::components::{MobBody, Monster, WorldPosition};
use crate::replication::ReplicationState;
use crate::world::{block_pos, cast_ray, VoxelWorld, WorldQuery};

/// Gravity (блоки/сек²)
pub const GRAVITY: f32 = -9.81;
/// Множитель горизонтальной скорости на земле (делится на 1+Δt)
pub const GROUND_FRICTION: f32 = 0.7;
/// Компоненты скорости меньше этого обнуляются
pub const VELOCITY_DEAD_ZONE: f32 = 0.05;
/// Насколько выталкиваем из блока / отодвигаем от поверхности
pub const SURFACE_OFFSET: f32 = 0.2;
/// Сколько границ блоков проверяет tracer за тик
pub const TRACE_STEPS: u32 = 2;

/// Один шаг физики для одного монстра
pub fn integrate(
    world: &dyn VoxelWorld,
    position: &mut WorldPosition,
    body: &mut MobBody,
    replication: &mut ReplicationState,
    dt: f32,
) {
    if body.on_ground {
        let block = block_pos(position.0);
        if world.block_at(block - IVec3::Y).is_air() {
            body.on_ground = false;
        }
        // Застряли в земле: выталкиваем вверх
        if world.block_at(block).is_solid() {
            body.on_ground = true;
            let unstuck = position.0 + Vec3::Y * SURFACE_OFFSET;
            replication.relocate(position, unstuck);
        }

        let damping = GROUND_FRICTION / (1.0 + dt);
        body.velocity.x = dampen(body.velocity.x, damping);
        body.velocity.z = dampen(body.velocity.z, damping);
    }

    if !body.on_ground {
        body.velocity.y += GRAVITY * dt;
    }

    if body.velocity.length_squared() <= 0.0 {
        return;
    }

    let displacement = body.velocity * dt;
    let next = match cast_ray(world, position.0, body.velocity, TRACE_STEPS) {
        Some(hit) if (hit.point - position.0).length_squared() <= displacement.length_squared() => {
            if hit.normal.x != 0.0 {
                body.velocity.x = 0.0;
            }
            if hit.normal.y != 0.0 {
                body.velocity.y = 0.0;
            }
            if hit.normal.z != 0.0 {
                body.velocity.z = 0.0;
            }
            if hit.normal.y > 0.0 {
                body.on_ground = true;
            }
            hit.point + hit.normal * SURFACE_OFFSET
        }
        // Препятствие дальше, чем уйдём за тик (или его нет)
        _ => position.0 + displacement,
    };

    replication.relocate(position, next);
}

fn dampen(component: f32, damping: f32) -> f32 {
    let damped = component * damping;
    if damped.abs() < VELOCITY_DEAD_ZONE {
        0.0
    } else {
        damped
    }
}

/// Система: физика всех монстров (включая умирающих: тело оседает)
pub fn integrate_monsters(
    world: Res<WorldQuery>,
    time: Res<Time<Fixed>>,
    mut monsters: Query<(&mut WorldPosition, &mut MobBody, &mut ReplicationState), With<Monster>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (mut position, mut body, mut replication) in monsters.iter_mut() {
        integrate(&**world, &mut position, &mut body, &mut replication, dt);
    }
}
