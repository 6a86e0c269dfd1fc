//! Монстр: вид, темперамент, боевые tunables

use bevy::prelude::*;
use rand::Rng;

/// Монстр: неигровая сущность под управлением AI
///
/// Полный набор компонентов собирает `spawn::monster_bundle`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Monster {
    pub kind: MobKind,
}

/// Вид моба (wire type id в spawn-пакете)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum MobKind {
    Pig,
    Sheep,
    Cow,
    Hen,
    Wolf,
    Zombie,
}

/// Как моб реагирует на удар и что делает в погоне
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temperament {
    /// Убегает от обидчика (ESCAPING)
    Skittish,
    /// Преследует и атакует (CHASING/ATTACKING)
    Hostile,
}

impl MobKind {
    /// Фермерские животные: дефолтный случайный выбор spawner'а
    pub const PASSIVE: [MobKind; 4] = [MobKind::Pig, MobKind::Sheep, MobKind::Cow, MobKind::Hen];

    pub fn type_id(self) -> u8 {
        match self {
            MobKind::Pig => 90,
            MobKind::Sheep => 91,
            MobKind::Cow => 92,
            MobKind::Hen => 93,
            MobKind::Wolf => 95,
            MobKind::Zombie => 54,
        }
    }

    pub fn from_type_id(id: u8) -> Option<Self> {
        match id {
            90 => Some(MobKind::Pig),
            91 => Some(MobKind::Sheep),
            92 => Some(MobKind::Cow),
            93 => Some(MobKind::Hen),
            95 => Some(MobKind::Wolf),
            54 => Some(MobKind::Zombie),
            _ => None,
        }
    }

    pub fn temperament(self) -> Temperament {
        match self {
            MobKind::Wolf | MobKind::Zombie => Temperament::Hostile,
            _ => Temperament::Skittish,
        }
    }

    /// Имя пресета в `MonsterPresets`, который вид применяет при спавне
    pub fn preset_name(self) -> Option<&'static str> {
        match self {
            MobKind::Wolf => Some("Wolf"),
            MobKind::Zombie => Some("Zombie"),
            _ => None,
        }
    }

    pub fn random_passive(rng: &mut impl Rng) -> Self {
        Self::PASSIVE[rng.gen_range(0..Self::PASSIVE.len())]
    }
}

/// Боевые и perception tunables (меняются пресетами)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CombatStats {
    /// Урон за одну атаку (усекается до целого при применении)
    pub attack_damage: f32,
    pub attack_range: f32,
    /// Множитель накопления attack interval (больше: чаще атаки)
    pub attack_rate: f32,
    pub sight_distance: f32,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            attack_damage: 1.0,
            attack_range: 5.0,
            attack_rate: 3.0,
            sight_distance: 25.0,
        }
    }
}
