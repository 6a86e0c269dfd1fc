//! VoxelGrid: in-memory реализация `VoxelWorld`
//!
//! Разреженная карта блоков + кеш высот колонок. Используется headless
//! runner'ом и тестами; на сервере место занимает настоящее хранилище чанков.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use super::{BlockType, VoxelWorld};

#[derive(Debug, Clone, Default)]
pub struct VoxelGrid {
    blocks: HashMap<IVec3, BlockType>,
    heights: HashMap<IVec2, i32>,
    /// Чанки, которые "ещё не загружены" (по умолчанию загружено всё)
    unloaded: HashSet<IVec3>,
}

impl VoxelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Плоская площадка из камня: колонки x,z в [-half_extent, half_extent),
    /// верхний слой на `ground_y`
    pub fn flat(ground_y: i32, half_extent: i32) -> Self {
        let mut grid = Self::new();
        for x in -half_extent..half_extent {
            for z in -half_extent..half_extent {
                grid.set_block(IVec3::new(x, ground_y, z), BlockType::STONE);
            }
        }
        grid
    }

    pub fn set_block(&mut self, pos: IVec3, block: BlockType) {
        let column = IVec2::new(pos.x, pos.z);
        if block.is_air() {
            self.blocks.remove(&pos);
            if self.heights.get(&column) == Some(&pos.y) {
                self.refresh_height(pos.x, pos.z);
            }
        } else {
            self.blocks.insert(pos, block);
            let top = self.heights.entry(column).or_insert(pos.y);
            *top = (*top).max(pos.y);
        }
    }

    /// Столб блоков от `from_y` до `to_y` включительно
    pub fn fill_column(&mut self, x: i32, z: i32, from_y: i32, to_y: i32, block: BlockType) {
        for y in from_y..=to_y {
            self.set_block(IVec3::new(x, y, z), block);
        }
    }

    pub fn unload_chunk(&mut self, chunk: IVec3) {
        self.unloaded.insert(chunk);
    }

    pub fn load_chunk(&mut self, chunk: IVec3) {
        self.unloaded.remove(&chunk);
    }

    fn refresh_height(&mut self, x: i32, z: i32) {
        let top = self
            .blocks
            .keys()
            .filter(|pos| pos.x == x && pos.z == z)
            .map(|pos| pos.y)
            .max();

        match top {
            Some(y) => {
                self.heights.insert(IVec2::new(x, z), y);
            }
            None => {
                self.heights.remove(&IVec2::new(x, z));
            }
        }
    }
}

impl VoxelWorld for VoxelGrid {
    fn block_at(&self, pos: IVec3) -> BlockType {
        self.blocks.get(&pos).copied().unwrap_or(BlockType::AIR)
    }

    fn height_at(&self, x: i32, z: i32) -> i32 {
        self.heights.get(&IVec2::new(x, z)).copied().unwrap_or(0)
    }

    fn is_chunk_loaded(&self, chunk: IVec3) -> bool {
        !self.unloaded.contains(&chunk)
    }
}
