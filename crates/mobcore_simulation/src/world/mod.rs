//! World query interface: воксельный мир глазами монстров
//!
//! Хранение чанков живёт снаружи симуляции. Монстрам нужно три вопроса:
//! - какой блок в целой координате
//! - высота рельефа в колонке (x, z)
//! - загружен ли чанк (spatial partition), чтобы было кому broadcast'ить
//!
//! `WorldQuery`: Resource-обёртка над любым `VoxelWorld`.

use bevy::prelude::*;
use std::ops::Deref;

pub mod grid;
pub mod trace;

pub use grid::VoxelGrid;
pub use trace::{cast_ray, RayHit};

/// Размеры чанка (spatial partition) в блоках
pub const CHUNK_WIDTH: i32 = 16;
pub const CHUNK_HEIGHT: i32 = 128;

/// Block ID (8-bit, как на проводе)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub struct BlockType(pub u8);

impl BlockType {
    pub const AIR: BlockType = BlockType(0);
    pub const STONE: BlockType = BlockType(1);
    pub const GRASS: BlockType = BlockType(2);
    pub const DIRT: BlockType = BlockType(3);
    pub const WATER: BlockType = BlockType(8);
    pub const STATIONARY_WATER: BlockType = BlockType(9);
    pub const LAVA: BlockType = BlockType(10);
    pub const STATIONARY_LAVA: BlockType = BlockType(11);
    pub const FIRE: BlockType = BlockType(51);

    pub fn is_air(self) -> bool {
        self == Self::AIR
    }

    /// Поджигает ли блок того, кто в нём/на нём стоит
    pub fn is_burning(self) -> bool {
        matches!(self, Self::LAVA | Self::STATIONARY_LAVA | Self::FIRE)
    }

    /// Непрозрачный твёрдый блок: останавливает лучи и движение
    pub fn is_solid(self) -> bool {
        !self.is_air()
            && !self.is_burning()
            && !matches!(self, Self::WATER | Self::STATIONARY_WATER)
    }
}

/// Внешний воксельный мир (read-only с точки зрения симуляции)
pub trait VoxelWorld: Send + Sync + 'static {
    fn block_at(&self, pos: IVec3) -> BlockType;

    /// Y самого верхнего не-воздушного блока колонки (0 для пустой колонки)
    fn height_at(&self, x: i32, z: i32) -> i32;

    fn is_chunk_loaded(&self, chunk: IVec3) -> bool;
}

/// Resource: мир, к которому обращаются системы монстров
#[derive(Resource)]
pub struct WorldQuery(Box<dyn VoxelWorld>);

impl WorldQuery {
    pub fn new(world: impl VoxelWorld) -> Self {
        Self(Box::new(world))
    }
}

impl Deref for WorldQuery {
    type Target = dyn VoxelWorld;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Целая координата блока, в котором лежит точка
pub fn block_pos(position: Vec3) -> IVec3 {
    position.floor().as_ivec3()
}

/// Координаты чанка, содержащего точку
pub fn chunk_of(position: Vec3) -> IVec3 {
    let block = block_pos(position);
    IVec3::new(
        block.x.div_euclid(CHUNK_WIDTH),
        block.y.div_euclid(CHUNK_HEIGHT),
        block.z.div_euclid(CHUNK_WIDTH),
    )
}

/// Стоит ли точка в огне/лаве или прямо над ними (блок ниже)
pub fn touches_fire(world: &dyn VoxelWorld, position: Vec3) -> bool {
    let block = block_pos(position);
    world.block_at(block).is_burning() || world.block_at(block - IVec3::Y).is_burning()
}
