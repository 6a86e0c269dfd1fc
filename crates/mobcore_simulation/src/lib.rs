//! MOBCORE Simulation Core
//!
//! ECS-симуляция монстров на Bevy 0.16 для тикового воксельного сервера:
//! AI (FSM + горение), восприятие через tracer, kinematic физика,
//! бой, репликация движения наблюдателям чанка.
//!
//! Тик = один прогон `FixedUpdate`, системы идут цепочкой `MonsterTick`:
//! Lifecycle → Perception → Decision → Damage → Motion → Physics → Replication.
//! Мир (воксели, чанки), транспорт и pickup-спавнер: внешние, через
//! `WorldQuery` и события.

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod debug;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod replication;
pub mod spawn;
pub mod world;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, AiState, Brain, Burn, MetaState, PerceptionEvent};
pub use combat::{CombatPlugin, DamageDealt, DamageRequest, Dying, EntityDied, ItemKind, PickupSpawn};
pub use components::*;
pub use config::{ConfigError, MonsterPresets, SimulationSettings};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel, LogPrinter};
pub use replication::{
    AnnounceMonster, ChunkBroadcast, ChunkTransfer, DirectPacket, MobPacket, ReplicationPlugin, ReplicationState,
};
pub use spawn::{spawn_monster_in, spawn_player_in, MonsterBundle};
pub use world::{BlockType, VoxelGrid, VoxelWorld, WorldQuery};

/// Порядок систем внутри одного тика
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonsterTick {
    /// Destroy countdown мертвых
    Lifecycle,
    /// Скан/проверка цели
    Perception,
    /// Горение + поведение состояния
    Decision,
    /// Применение урона, loot
    Damage,
    /// Navigation → скорость
    Motion,
    /// Интеграция, ориентация
    Physics,
    /// Пакеты наблюдателям
    Replication,
}

/// Частота тика по умолчанию (Hz)
pub const DEFAULT_TICK_HZ: f64 = 20.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin {
    pub seed: u64,
    pub tick_hz: f64,
}

impl SimulationPlugin {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new(42)
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(self.tick_hz))
            // Детерминистичный RNG (seed из настроек)
            .insert_resource(DeterministicRng::new(self.seed))
            .configure_sets(
                FixedUpdate,
                (
                    MonsterTick::Lifecycle,
                    MonsterTick::Perception,
                    MonsterTick::Decision,
                    MonsterTick::Damage,
                    MonsterTick::Motion,
                    MonsterTick::Physics,
                    MonsterTick::Replication,
                )
                    .chain(),
            );

        // Хост может подложить свой мир/пресеты до или после plugin'а
        if !app.world().contains_resource::<WorldQuery>() {
            app.insert_resource(WorldQuery::new(VoxelGrid::new()));
        }
        if !app.world().contains_resource::<MonsterPresets>() {
            let presets = MonsterPresets::builtin().unwrap_or_else(|err| {
                log_error(&format!("builtin monster presets: {}", err));
                MonsterPresets::default()
            });
            app.insert_resource(presets);
        }

        // Подсистемы
        app.add_plugins((
            AIPlugin,
            CombatPlugin,
            movement::MovementPlugin,
            physics::PhysicsPlugin,
            ReplicationPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Тики гоняются через `advance_fixed`, не через `app.update()`.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin::new(seed));
    app.finish();
    app.cleanup();

    app
}

/// Один детерминированный тик длиной `dt` секунд
///
/// После тика события сдвигаются на один буфер (как `App::update`):
/// непрочитанное живёт два тика, потом выбрасывается.
pub fn advance_fixed(world: &mut World, dt: f32) {
    world
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(dt));
    world.run_schedule(FixedUpdate);
    rotate_events(world);
}

fn rotate<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Double-buffer swap для всех событий симуляции
pub fn rotate_events(world: &mut World) {
    rotate::<PerceptionEvent>(world);
    rotate::<DamageRequest>(world);
    rotate::<DamageDealt>(world);
    rotate::<EntityDied>(world);
    rotate::<PickupSpawn>(world);
    rotate::<ChunkBroadcast>(world);
    rotate::<DirectPacket>(world);
    rotate::<ChunkTransfer>(world);
    rotate::<AnnounceMonster>(world);
}

/// Snapshot монстров для сравнения детерминизма
pub fn monster_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &Monster, &WorldPosition, &Health, &AiState, &MetaState)>();
    let mut monsters: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    monsters.sort_by_key(|(entity, ..)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, monster, position, health, state, meta) in monsters {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(
            format!("{:?}{:?}{:?}{:?}{:?}", monster.kind, position.0, health.current, state, meta).as_bytes(),
        );
    }

    snapshot
}
