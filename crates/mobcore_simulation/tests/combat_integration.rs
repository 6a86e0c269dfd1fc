//! Combat integration test
//!
//! Полный тик через SimulationPlugin:
//! - destroy countdown после смерти
//! - горение (поджог, урон, затухание)
//! - Wolf догоняет и бьёт игрока
//! - loot при смерти

mod common;

use bevy::prelude::*;
use common::*;
use mobcore_simulation::components::MobKind;
use mobcore_simulation::*;

#[test]
fn test_dead_monster_despawns_after_delay() {
    let mut app = flat_arena(42);
    let cow = spawn_still_monster(&mut app, MobKind::Cow, 0.5, 0.5);

    app.world_mut().send_event(DamageRequest {
        target: cow,
        amount: 100,
        instigator: None,
    });
    step(&mut app, 0.4, 1);
    assert!(app.world().get::<Dying>(cow).is_some());

    // 0.4, 0.8: ещё лежит, 1.2 > 1.0, убран
    step(&mut app, 0.4, 2);
    assert!(app.world().get_entity(cow).is_ok());

    step(&mut app, 0.4, 1);
    assert!(app.world().get_entity(cow).is_err());
}

#[test]
fn test_burning_cycle_on_fire_block() {
    let mut grid = VoxelGrid::flat(0, 8);
    grid.set_block(IVec3::new(0, 1, 0), BlockType::FIRE);
    let mut app = create_arena_app(7, grid);

    // Без Monster: AI и физика его не трогают, только горение и урон
    let position = Vec3::new(0.5, 1.2, 0.5);
    let torch = app
        .world_mut()
        .spawn((
            WorldPosition(position),
            Health::new(1000),
            MetaState::Normal,
            Burn::default(),
            ReplicationState::new(position, 0.0),
        ))
        .id();

    let mut metadata = Vec::new();
    let mut damage = Vec::new();
    for _ in 0..9 {
        step(&mut app, 1.0, 1);
        metadata.extend(drain::<ChunkBroadcast>(&mut app).into_iter().filter_map(|b| match b.packet {
            MobPacket::Metadata { entity, burning } if entity == torch => Some(burning),
            _ => None,
        }));
        damage.extend(drain::<DamageDealt>(&mut app).into_iter().map(|d| d.damage));
    }

    assert_eq!(metadata, vec![true, false]);
    assert_eq!(damage.len(), 8);
    assert_eq!(damage[0], 6);
    assert_eq!(app.world().get::<MetaState>(torch), Some(&MetaState::Normal));
    assert_eq!(app.world().get::<Health>(torch).unwrap().current, 1000 - 8 * 6);
}

#[test]
fn test_monster_burns_on_fire_block() {
    let mut grid = VoxelGrid::flat(0, 8);
    grid.set_block(IVec3::new(0, 1, 0), BlockType::FIRE);
    let mut app = create_arena_app(7, grid);

    // Полный путь: физика сажает свинью в огонь, AI тикает рядом
    let pig = spawn_still_monster(&mut app, MobKind::Pig, 0.5, 0.5);
    app.world_mut().entity_mut(pig).insert(Health::new(1000));

    let mut metadata = Vec::new();
    let mut damage = Vec::new();
    for _ in 0..9 {
        step(&mut app, 1.0, 1);
        metadata.extend(drain::<ChunkBroadcast>(&mut app).into_iter().filter_map(|b| match b.packet {
            MobPacket::Metadata { entity, burning } if entity == pig => Some(burning),
            _ => None,
        }));
        damage.extend(drain::<DamageDealt>(&mut app).into_iter().filter(|d| d.target == pig));
    }

    assert_eq!(metadata, vec![true, false]);
    assert_eq!(damage.len(), 8);
    assert!(damage.iter().all(|d| d.damage == 6 && d.instigator.is_none()));
    assert!(position_of(&app, pig).y < 2.0, "pig at {:?}", position_of(&app, pig));
    assert_eq!(app.world().get::<MetaState>(pig), Some(&MetaState::Normal));
    assert_eq!(app.world().get::<Health>(pig).unwrap().current, 1000 - 8 * 6);
    assert!(app.world().get::<Dying>(pig).is_none());
    // Огонь без instigator: свинья не убегает
    assert_eq!(app.world().get::<AiState>(pig), Some(&AiState::Idle));
}

#[test]
fn test_burning_away_from_fire_deals_one() {
    let mut grid = VoxelGrid::flat(0, 8);
    grid.set_block(IVec3::new(0, 1, 0), BlockType::FIRE);
    let mut app = create_arena_app(7, grid);

    let position = Vec3::new(0.5, 1.2, 0.5);
    let torch = app
        .world_mut()
        .spawn((
            WorldPosition(position),
            Health::new(100),
            MetaState::Normal,
            Burn::default(),
            ReplicationState::new(position, 0.0),
        ))
        .id();

    step(&mut app, 1.0, 1);
    assert_eq!(app.world().get::<MetaState>(torch), Some(&MetaState::Burning));

    app.world_mut().get_mut::<WorldPosition>(torch).unwrap().0 = Vec3::new(4.5, 1.2, 4.5);
    drain::<DamageDealt>(&mut app);
    step(&mut app, 1.0, 3);

    let dealt = drain::<DamageDealt>(&mut app);
    let damage: Vec<u32> = dealt.iter().map(|d| d.damage).collect();
    assert_eq!(damage, vec![1, 1, 1]);
    // Урон от огня без instigator: цель не меняется
    assert!(dealt.iter().all(|d| d.instigator.is_none()));
}

#[test]
fn test_wolf_hunts_player() {
    let mut app = flat_arena(42);
    let wolf = spawn_still_monster(&mut app, MobKind::Wolf, 0.5, 0.5);
    let player = spawn_player_in(app.world_mut(), Vec3::new(8.5, 1.2, 0.5));

    step(&mut app, TICK, 1);
    assert_eq!(app.world().get::<AiState>(wolf), Some(&AiState::Chasing));
    assert_eq!(app.world().get::<Brain>(wolf).unwrap().target, Some(player));

    let mut hits = Vec::new();
    for _ in 0..400 {
        step(&mut app, TICK, 1);
        hits.extend(drain::<DamageDealt>(&mut app));
    }

    assert!(!hits.is_empty(), "wolf never attacked");
    assert!(hits.iter().all(|hit| hit.target == player && hit.instigator == Some(wolf)));
    assert!(hits.iter().all(|hit| hit.damage == 4));

    // 20 HP / 4 за удар: пятый удар убивает, дальше мертвого не бьют
    let health = app.world().get::<Health>(player).unwrap();
    assert_eq!(health.current, 0);
    assert_eq!(hits.len(), 5);
    assert!(hits[4].target_died);
    // Игрок не получает Dying и остаётся в мире
    assert!(app.world().get::<Dying>(player).is_none());
    // Мёртвая цель теряется, новой Wolf не находит
    assert_eq!(app.world().get::<AiState>(wolf), Some(&AiState::Idle));
    assert_eq!(app.world().get::<Brain>(wolf).unwrap().target, None);
}

#[test]
fn test_cow_drops_loot_on_death() {
    let mut app = flat_arena(3);
    let cow = spawn_still_monster(&mut app, MobKind::Cow, 0.5, 0.5);
    let player = spawn_player_in(app.world_mut(), Vec3::new(30.5, 1.2, 30.5));

    app.world_mut().send_event(DamageRequest {
        target: cow,
        amount: 50,
        instigator: Some(player),
    });
    step(&mut app, TICK, 1);

    let died = drain::<EntityDied>(&mut app);
    assert_eq!(died.len(), 1);
    assert_eq!(died[0].killer, Some(player));

    let pickups = drain::<PickupSpawn>(&mut app);
    // Говядина всегда 1..=3, кожа 0..=2
    let beef: Vec<_> = pickups.iter().filter(|p| p.item == ItemKind::RawBeef).collect();
    assert_eq!(beef.len(), 1);
    assert!((1..=3).contains(&beef[0].count));
    assert!(pickups.iter().all(|p| p.count > 0));
}

#[test]
fn test_skittish_animal_runs_from_attacker() {
    let mut app = flat_arena(5);
    let pig = spawn_still_monster(&mut app, MobKind::Pig, 0.5, 0.5);
    let player = spawn_player_in(app.world_mut(), Vec3::new(3.5, 1.2, 0.5));

    app.world_mut().send_event(DamageRequest {
        target: pig,
        amount: 1,
        instigator: Some(player),
    });
    step(&mut app, TICK, 1);
    assert_eq!(app.world().get::<AiState>(pig), Some(&AiState::Escaping));

    step(&mut app, TICK, 20);
    // Убегает в сторону от игрока (-x)
    assert!(position_of(&app, pig).x < 0.0);
}
