//! Perception: поиск и проверка цели через line of sight по вокселям
//!
//! Скан ограничен `SCAN_LIMIT` кандидатами и берёт первого видимого игрока
//! (first-match, не nearest). Кандидаты идут в порядке `Entity::index`.

use bevy::prelude::*;

use crate::world::{block_pos, cast_ray, VoxelWorld};

/// Сколько кандидатов максимум просматривает один скан
pub const SCAN_LIMIT: usize = 100;

/// Кандидат для скана: (entity, позиция, это игрок?)
pub type Candidate = (Entity, Vec3, bool);

/// Итог скана
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sighting {
    Saw(Entity),
    /// Лимит исчерпан без видимой цели
    Lost,
    /// Кандидаты кончились раньше лимита
    Nothing,
}

/// Виден ли `target` из `origin`: в радиусе и луч ничем не перекрыт
///
/// Луч считает пересечения границ блоков, до цели их ровно
/// |Δx| + |Δy| + |Δz| (в блоках), по диагонали это больше длины.
pub fn in_line_of_sight(world: &dyn VoxelWorld, origin: Vec3, target: Vec3, sight_distance: f32) -> bool {
    let diff = target - origin;
    if diff.length() > sight_distance {
        return false;
    }
    let cells = (block_pos(target) - block_pos(origin)).abs();
    let crossings = (cells.x + cells.y + cells.z) as u32;
    cast_ray(world, origin, diff, crossings).is_none()
}

/// "acquire target": первый видимый игрок среди кандидатов
pub fn acquire_target(
    world: &dyn VoxelWorld,
    origin: Vec3,
    sight_distance: f32,
    candidates: impl IntoIterator<Item = Candidate>,
) -> Sighting {
    for (examined, (entity, position, is_player)) in candidates.into_iter().enumerate() {
        if is_player && in_line_of_sight(world, origin, position, sight_distance) {
            return Sighting::Saw(entity);
        }
        if examined + 1 >= SCAN_LIMIT {
            return Sighting::Lost;
        }
    }
    Sighting::Nothing
}

/// "validate target": `None` (нет цели или она despawned): невалидна
pub fn validate_target(
    world: &dyn VoxelWorld,
    origin: Vec3,
    sight_distance: f32,
    target: Option<Vec3>,
) -> bool {
    match target {
        Some(position) => in_line_of_sight(world, origin, position, sight_distance),
        None => false,
    }
}
