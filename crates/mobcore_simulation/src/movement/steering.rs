//! Steering: move-to-destination → желаемая скорость (+ прыжок через уступ)

use bevy::prelude::*;

use crate::combat::Dying;
use crate::components::{MobBody, Monster, Navigation, Orientation, WorldPosition};
use crate::replication::ReplicationState;
use crate::world::{VoxelWorld, WorldQuery};

/// Горизонтальная скорость ходьбы (блоки/сек)
pub const WALK_SPEED: f32 = 3.0;
pub const JUMP_VELOCITY: f32 = 7.0;
/// Прыгаем, если высота следующей колонки в (y - DROP, y + CLIMB)
pub const JUMP_MAX_DROP: f32 = 1.2;
pub const JUMP_MAX_CLIMB: f32 = 2.5;
/// Ближе этого (в квадрате) к destination ориентацию не пересчитываем
pub const FACING_MIN_SQR_DISTANCE: f32 = 0.1;

/// Конвертирует приказ навигации в горизонтальную скорость.
///
/// Достигнутая точка снимает приказ, но прыжок в этом тике ещё возможен.
pub fn steer(world: &dyn VoxelWorld, position: Vec3, navigation: &mut Navigation, body: &mut MobBody) {
    if !navigation.moving {
        return;
    }

    if navigation.reached(position) {
        navigation.stop();
    } else {
        let mut heading = navigation.destination - position;
        heading.y = 0.0;
        let heading = heading.normalize_or_zero() * WALK_SPEED;
        body.velocity.x = heading.x;
        body.velocity.z = heading.z;
    }

    if body.on_ground && body.velocity.length_squared() > 0.0 {
        try_jump(world, position, body);
    }
}

/// Прыжок, если следующая по ходу колонка: преодолимый уступ
pub fn try_jump(world: &dyn VoxelWorld, position: Vec3, body: &mut MobBody) -> bool {
    let next = position + body.velocity.normalize_or_zero();
    let next_height = world.height_at(next.x.floor() as i32, next.z.floor() as i32) as f32;

    if next_height > position.y - JUMP_MAX_DROP && next_height - position.y < JUMP_MAX_CLIMB {
        body.on_ground = false;
        body.velocity.y = JUMP_VELOCITY;
        return true;
    }
    false
}

/// Система: steering всех живых монстров с активным приказом
pub fn steer_monsters(
    world: Res<WorldQuery>,
    mut monsters: Query<(&WorldPosition, &mut Navigation, &mut MobBody), (With<Monster>, Without<Dying>)>,
) {
    for (position, mut navigation, mut body) in monsters.iter_mut() {
        steer(&**world, position.0, &mut navigation, &mut body);
    }
}

/// Система: ориентация смотрит на destination (после физики)
pub fn face_destination(
    mut monsters: Query<(&WorldPosition, &Navigation, &mut Orientation, &mut ReplicationState), With<Monster>>,
) {
    for (position, navigation, mut orientation, mut replication) in monsters.iter_mut() {
        let to_destination = navigation.destination - position.0;
        if to_destination.length_squared() <= FACING_MIN_SQR_DISTANCE {
            continue;
        }

        let facing = Orientation::from_direction(to_destination.normalize());
        replication.reorient(&mut orientation, facing);
    }
}
