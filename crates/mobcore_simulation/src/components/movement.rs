//! Movement компоненты: тело (скорость, земля), навигация, ориентация

use bevy::prelude::*;

/// Кинематическое тело монстра
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MobBody {
    /// Скорость (блоки/сек)
    pub velocity: Vec3,
    pub on_ground: bool,
}

/// Приказ "идти к точке" (move-to-destination)
///
/// `destination` остаётся после достижения цели: ориентация продолжает
/// смотреть на последнюю точку назначения.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Navigation {
    pub destination: Vec3,
    pub moving: bool,
}

impl Navigation {
    /// Квадрат расстояния, ближе которого точка считается достигнутой
    pub const REACHED_SQR_DISTANCE: f32 = 2.0;

    pub fn new(destination: Vec3) -> Self {
        Self {
            destination,
            moving: false,
        }
    }

    pub fn move_to(&mut self, destination: Vec3) {
        self.destination = destination;
        self.moving = true;
    }

    pub fn reached(&self, position: Vec3) -> bool {
        (self.destination - position).length_squared() < Self::REACHED_SQR_DISTANCE
    }

    pub fn stop(&mut self) {
        self.moving = false;
    }
}

/// Ориентация (градусы). Выводится из направления на destination.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    /// Направление → (yaw, pitch), yaw 0 смотрит вдоль +Z
    pub fn from_direction(direction: Vec3) -> Self {
        let yaw = if direction.x != 0.0 {
            direction.z.atan2(direction.x).to_degrees() - 90.0
        } else {
            0.0
        };
        let horizontal = (direction.x * direction.x + direction.z * direction.z).sqrt();
        let pitch = direction.y.atan2(horizontal).to_degrees();

        Self { yaw, pitch }
    }
}
