//! Общие helpers для integration тестов: арена, тики, события

#![allow(dead_code)]

use bevy::prelude::*;
use mobcore_simulation::*;

/// Стандартный тик (20 Hz)
pub const TICK: f32 = 0.05;

/// Headless App с заданным миром вместо пустого
pub fn create_arena_app(seed: u64, grid: VoxelGrid) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(WorldQuery::new(grid));
    app
}

/// Плоская площадка: верх камня на y = 0, монстры стоят на 1.2
pub fn flat_arena(seed: u64) -> App {
    create_arena_app(seed, VoxelGrid::flat(0, 32))
}

pub fn step(app: &mut App, dt: f32, ticks: usize) {
    for _ in 0..ticks {
        advance_fixed(app.world_mut(), dt);
    }
}

/// Забирает все накопленные события типа `E`
pub fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

/// Монстр, который сам не бродит (idle timer далеко в минусе)
pub fn spawn_still_monster(app: &mut App, kind: components::MobKind, x: f32, z: f32) -> Entity {
    let entity = spawn_monster_in(app.world_mut(), kind, x, z);
    if let Some(mut brain) = app.world_mut().get_mut::<Brain>(entity) {
        brain.idle_timer = -1.0e6;
    }
    entity
}

pub fn position_of(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<WorldPosition>(entity).expect("position").0
}
