//! Базовые компоненты сущностей мира: позиция, здоровье, игрок

use bevy::prelude::*;

/// Позиция сущности в мировых координатах (блоки)
///
/// Есть у всех, кого можно увидеть/атаковать: игроки, монстры.
/// Позицию монстра меняет только физика (через `ReplicationState::relocate`),
/// чтобы не рассинхронизировать dirty-флаги репликации.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WorldPosition(pub Vec3);

/// Здоровье
///
/// Инвариант: 0 ≤ current ≤ max. current == 0: мертв.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(10) // Default 10 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Marker: сущность-игрок (наблюдатель и потенциальная цель монстров)
///
/// Perception ищет цели только среди `With<Player>`.
/// Игрок также выступает observer'ом для `DirectPacket`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
