//! Tracer: луч через воксельную сетку (DDA, Amanatides & Woo)
//!
//! Используется физикой (куда врежемся за тик) и восприятием (line of sight).
//! `max_steps`: число пересечённых границ блоков, а не длина луча.

use bevy::prelude::*;

use super::{block_pos, VoxelWorld};

/// Первое пересечение луча с твёрдым блоком
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Точка входа в блок (мировые координаты)
    pub point: Vec3,
    /// Нормаль грани, через которую вошли (смотрит обратно к origin)
    pub normal: Vec3,
    pub block: IVec3,
    /// Расстояние от origin до `point`
    pub distance: f32,
}

/// Пускает луч из `origin` вдоль `direction` (длина неважна).
///
/// Стартовый блок не проверяется, застревание в земле обрабатывает физика.
pub fn cast_ray(
    world: &dyn VoxelWorld,
    origin: Vec3,
    direction: Vec3,
    max_steps: u32,
) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }

    let mut voxel = block_pos(origin);
    let step = IVec3::new(axis_sign(dir.x), axis_sign(dir.y), axis_sign(dir.z));
    let t_delta = Vec3::new(axis_delta(dir.x), axis_delta(dir.y), axis_delta(dir.z));
    let mut t_max = Vec3::new(
        first_boundary(origin.x, dir.x),
        first_boundary(origin.y, dir.y),
        first_boundary(origin.z, dir.z),
    );

    for _ in 0..max_steps {
        let axis = if t_max.x <= t_max.y && t_max.x <= t_max.z {
            0
        } else if t_max.y <= t_max.z {
            1
        } else {
            2
        };

        let t = t_max[axis];
        voxel[axis] += step[axis];
        t_max[axis] += t_delta[axis];

        if world.block_at(voxel).is_solid() {
            let mut normal = Vec3::ZERO;
            normal[axis] = -(step[axis] as f32);
            return Some(RayHit {
                point: origin + dir * t,
                normal,
                block: voxel,
                distance: t,
            });
        }
    }

    None
}

fn axis_sign(d: f32) -> i32 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

fn axis_delta(d: f32) -> f32 {
    if d == 0.0 {
        f32::INFINITY
    } else {
        1.0 / d.abs()
    }
}

/// Параметр t до первой границы блока по оси
fn first_boundary(origin: f32, d: f32) -> f32 {
    if d > 0.0 {
        (origin.floor() + 1.0 - origin) / d
    } else if d < 0.0 {
        (origin - origin.floor()) / -d
    } else {
        f32::INFINITY
    }
}
