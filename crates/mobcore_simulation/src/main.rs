//! Headless симуляция MOBCORE
//!
//! Арена из камня с костром и стеной, стадо животных, Wolf, Zombie и игрок.
//! Конфиг: путь в `MOBCORE_CONFIG` (по умолчанию `mobcore.toml`, можно не создавать).

use std::path::PathBuf;

use bevy::prelude::*;
use mobcore_simulation::components::MobKind;
use mobcore_simulation::debug::list_monsters;
use mobcore_simulation::spawn::{random_spawn_point, spawn_random_passive_in};
use mobcore_simulation::{
    advance_fixed, create_headless_app, log_error, log_info, set_log_level, spawn_monster_in, spawn_player_in,
    BlockType, ChunkBroadcast, ConfigError, DeterministicRng, DirectPacket, EntityDied, SimulationSettings, VoxelGrid, WorldQuery,
};

const ARENA_HALF_EXTENT: i32 = 24;
const GROUND_Y: i32 = 4;
const HERD_SIZE: usize = 6;
const TICKS: u32 = 1000;

fn main() {
    if let Err(err) = run() {
        log_error(&format!("simulation aborted: {}", err));
        std::process::exit(1);
    }
}

fn build_arena() -> VoxelGrid {
    let mut grid = VoxelGrid::flat(GROUND_Y, ARENA_HALF_EXTENT);

    // Костёр у центра: животные, забредшие сюда, загораются
    for x in 2..4 {
        for z in 2..4 {
            grid.set_block(IVec3::new(x, GROUND_Y + 1, z), BlockType::FIRE);
        }
    }

    // Стена вдоль x = -6
    for z in -8..8 {
        grid.fill_column(-6, z, GROUND_Y + 1, GROUND_Y + 3, BlockType::STONE);
    }

    grid
}

fn run() -> Result<(), ConfigError> {
    let config_path = std::env::var("MOBCORE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("mobcore.toml"));
    let settings = SimulationSettings::load_or_default(&config_path)?;
    set_log_level(settings.log_level);
    let presets = settings.load_presets()?;

    log_info(&format!(
        "Starting MOBCORE headless simulation (seed: {}, {} Hz)",
        settings.seed, settings.tick_hz
    ));

    let mut app = create_headless_app(settings.seed);
    // Настройки перекрывают дефолты plugin'а
    app.insert_resource(Time::<Fixed>::from_hz(settings.tick_hz))
        .insert_resource(presets)
        .insert_resource(WorldQuery::new(build_arena()));
    let dt = (1.0 / settings.tick_hz) as f32;

    let world = app.world_mut();
    let half = ARENA_HALF_EXTENT as f32 - 2.0;
    for _ in 0..HERD_SIZE {
        let (x, z) = {
            let mut rng = world.resource_mut::<DeterministicRng>();
            random_spawn_point(&mut rng.rng, half)
        };
        spawn_random_passive_in(world, x, z);
    }
    spawn_monster_in(world, MobKind::Wolf, -12.5, -12.5);
    spawn_monster_in(world, MobKind::Zombie, 12.5, -12.5);
    spawn_player_in(world, Vec3::new(0.5, GROUND_Y as f32 + 1.0, 10.5));

    let mut packets = 0usize;
    let mut deaths = 0usize;
    for tick in 0..TICKS {
        advance_fixed(world, dt);

        packets += world.resource_mut::<Events<ChunkBroadcast>>().drain().count();
        packets += world.resource_mut::<Events<DirectPacket>>().drain().count();
        deaths += world.resource_mut::<Events<EntityDied>>().drain().count();

        if tick % 100 == 0 {
            log_info(&format!("Tick {}: {} packets, {} deaths", tick, packets, deaths));
            list_monsters(world);
        }
    }

    log_info(&format!(
        "Simulation complete: {} ticks, {} packets, {} deaths",
        TICKS, packets, deaths
    ));
    Ok(())
}
