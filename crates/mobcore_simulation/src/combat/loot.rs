//! Loot: что выпадает из монстра при смерти
//!
//! Pickup-сущности создаёт хост по событию `PickupSpawn`.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::EntityDied;
use crate::components::{MobKind, Monster, WorldPosition};
use crate::replication::fixed_point;
use crate::DeterministicRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Leather,
    RawBeef,
    RawPorkchop,
    Wool,
    Feather,
    RawChicken,
    RottenFlesh,
}

impl ItemKind {
    /// Wire id предмета
    pub fn item_id(self) -> u16 {
        match self {
            ItemKind::Leather => 334,
            ItemKind::RawBeef => 363,
            ItemKind::RawPorkchop => 319,
            ItemKind::Wool => 35,
            ItemKind::Feather => 288,
            ItemKind::RawChicken => 365,
            ItemKind::RottenFlesh => 367,
        }
    }
}

/// Строка loot-таблицы: предмет и количество [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LootEntry {
    pub item: ItemKind,
    pub min: u32,
    pub max: u32,
}

const fn entry(item: ItemKind, min: u32, max: u32) -> LootEntry {
    LootEntry { item, min, max }
}

static COW_LOOT: [LootEntry; 2] = [entry(ItemKind::Leather, 0, 2), entry(ItemKind::RawBeef, 1, 3)];
static PIG_LOOT: [LootEntry; 1] = [entry(ItemKind::RawPorkchop, 1, 3)];
static SHEEP_LOOT: [LootEntry; 1] = [entry(ItemKind::Wool, 1, 1)];
static HEN_LOOT: [LootEntry; 2] = [entry(ItemKind::Feather, 0, 2), entry(ItemKind::RawChicken, 1, 1)];
static ZOMBIE_LOOT: [LootEntry; 1] = [entry(ItemKind::RottenFlesh, 0, 2)];

pub fn loot_table(kind: MobKind) -> &'static [LootEntry] {
    match kind {
        MobKind::Cow => &COW_LOOT,
        MobKind::Pig => &PIG_LOOT,
        MobKind::Sheep => &SHEEP_LOOT,
        MobKind::Hen => &HEN_LOOT,
        MobKind::Zombie => &ZOMBIE_LOOT,
        MobKind::Wolf => &[],
    }
}

/// Event: создать pickup (позиция в fixed-point, ×32)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PickupSpawn {
    pub position: IVec3,
    pub item: ItemKind,
    pub count: u32,
}

/// Pickup на позиции монстра; нулевое количество: ничего
pub fn drop_item(position: Vec3, item: ItemKind, count: u32) -> Option<PickupSpawn> {
    if count == 0 {
        return None;
    }
    Some(PickupSpawn {
        position: fixed_point(position),
        item,
        count,
    })
}

/// Количество равномерно из [min, max] включительно
pub fn random_drop(
    rng: &mut impl Rng,
    position: Vec3,
    item: ItemKind,
    min: u32,
    max: u32,
) -> Option<PickupSpawn> {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let count = rng.gen_range(low..=high);
    drop_item(position, item, count)
}

/// Система: loot при смерти монстра
pub fn drop_loot_on_death(
    mut deaths: EventReader<EntityDied>,
    mut rng: ResMut<DeterministicRng>,
    monsters: Query<(&Monster, &WorldPosition)>,
    mut pickups: EventWriter<PickupSpawn>,
) {
    for death in deaths.read() {
        let Ok((monster, position)) = monsters.get(death.entity) else {
            continue;
        };

        for loot in loot_table(monster.kind) {
            if let Some(pickup) = random_drop(&mut rng.rng, position.0, loot.item, loot.min, loot.max) {
                pickups.write(pickup);
            }
        }
    }
}
