//! Репликация через полный тик: spawn, движение, чанки

mod common;

use bevy::prelude::*;
use common::*;
use mobcore_simulation::components::{MobKind, Navigation};
use mobcore_simulation::*;

fn packets_for(broadcasts: &[ChunkBroadcast], entity: Entity) -> Vec<MobPacket> {
    broadcasts
        .iter()
        .filter(|b| b.packet.entity() == entity)
        .map(|b| b.packet.clone())
        .collect()
}

#[test]
fn test_new_monster_is_announced_once() {
    let mut app = flat_arena(11);
    let cow = spawn_still_monster(&mut app, MobKind::Cow, 0.5, 0.5);

    step(&mut app, TICK, 1);
    let first = packets_for(&drain::<ChunkBroadcast>(&mut app), cow);
    assert!(matches!(
        first[0],
        MobPacket::Spawn { mob_type: 92, metadata: 0, .. }
    ));

    step(&mut app, TICK, 10);
    let later = packets_for(&drain::<ChunkBroadcast>(&mut app), cow);
    assert!(!later.iter().any(|p| matches!(p, MobPacket::Spawn { .. })));
}

#[test]
fn test_walking_monster_sends_relative_moves_and_periodic_teleport() {
    let mut app = flat_arena(11);
    let pig = spawn_still_monster(&mut app, MobKind::Pig, 0.5, 0.5);
    step(&mut app, TICK, 1);
    drain::<ChunkBroadcast>(&mut app);

    app.world_mut()
        .get_mut::<Navigation>(pig)
        .unwrap()
        .move_to(Vec3::new(0.5, 1.2, 20.5));

    let mut packets = Vec::new();
    for _ in 0..60 {
        step(&mut app, TICK, 1);
        packets.extend(packets_for(&drain::<ChunkBroadcast>(&mut app), pig));
    }

    // Первый шаг меняет и позицию, и взгляд
    assert!(matches!(packets[0], MobPacket::RelativeMoveLook { .. }));
    // Идём строго вдоль +z: x не меняется
    assert!(packets.iter().all(|p| match p {
        MobPacket::RelativeMove { dx, dz, .. } | MobPacket::RelativeMoveLook { dx, dz, .. } => *dx == 0 && *dz >= 0,
        _ => true,
    }));
    // 3 секунды ходьбы: хотя бы один абсолютный resync
    assert!(packets.iter().any(|p| matches!(p, MobPacket::Teleport { .. })));
    // Не больше одного пакета на тик
    assert!(packets.len() <= 60);
}

#[test]
fn test_crossing_chunk_border_emits_transfer() {
    let mut app = flat_arena(11);
    let pig = spawn_still_monster(&mut app, MobKind::Pig, 0.5, 0.5);

    app.world_mut()
        .get_mut::<Navigation>(pig)
        .unwrap()
        .move_to(Vec3::new(-4.5, 1.2, 0.5));

    let mut transfers = Vec::new();
    for _ in 0..80 {
        step(&mut app, TICK, 1);
        transfers.extend(drain::<ChunkTransfer>(&mut app));
    }

    assert_eq!(
        transfers,
        vec![ChunkTransfer {
            entity: pig,
            from: IVec3::ZERO,
            to: IVec3::new(-1, 0, 0),
        }]
    );
    assert_eq!(
        app.world().get::<ReplicationState>(pig).unwrap().chunk,
        IVec3::new(-1, 0, 0)
    );
}

#[test]
fn test_unloaded_chunk_is_silent() {
    let mut grid = VoxelGrid::flat(0, 16);
    grid.unload_chunk(IVec3::ZERO);
    let mut app = create_arena_app(11, grid);
    let pig = spawn_still_monster(&mut app, MobKind::Pig, 0.5, 0.5);
    app.world_mut()
        .get_mut::<Navigation>(pig)
        .unwrap()
        .move_to(Vec3::new(8.5, 1.2, 8.5));

    step(&mut app, TICK, 20);

    assert!(packets_for(&drain::<ChunkBroadcast>(&mut app), pig).is_empty());
    // Флаг ждёт загрузки чанка
    assert!(app.world().get::<ReplicationState>(pig).unwrap().position_dirty());
}

#[test]
fn test_monster_is_announced_once_its_chunk_loads() {
    let mut grid = VoxelGrid::flat(0, 16);
    grid.unload_chunk(IVec3::ZERO);
    let mut app = create_arena_app(11, grid);
    let pig = spawn_still_monster(&mut app, MobKind::Pig, 0.5, 0.5);

    step(&mut app, TICK, 3);
    assert!(packets_for(&drain::<ChunkBroadcast>(&mut app), pig).is_empty());
    assert!(!app.world().get::<ReplicationState>(pig).unwrap().announced());

    // Чанк подгрузился
    app.insert_resource(WorldQuery::new(VoxelGrid::flat(0, 16)));
    app.world_mut()
        .get_mut::<Navigation>(pig)
        .unwrap()
        .move_to(Vec3::new(8.5, 1.2, 8.5));

    let mut packets = Vec::new();
    for _ in 0..20 {
        step(&mut app, TICK, 1);
        packets.extend(packets_for(&drain::<ChunkBroadcast>(&mut app), pig));
    }

    assert!(matches!(packets[0], MobPacket::Spawn { mob_type: 90, .. }), "{:?}", packets[0]);
    assert_eq!(
        packets.iter().filter(|p| matches!(p, MobPacket::Spawn { .. })).count(),
        1
    );
    assert!(packets.len() > 1, "pig never moved");
    assert!(app.world().get::<ReplicationState>(pig).unwrap().announced());
}

#[test]
fn test_announce_request_goes_to_single_observer() {
    let mut app = flat_arena(11);
    let sheep = spawn_still_monster(&mut app, MobKind::Sheep, 0.5, 0.5);
    let observer = spawn_player_in(app.world_mut(), Vec3::new(60.5, 1.2, 60.5));
    step(&mut app, TICK, 1);
    drain::<DirectPacket>(&mut app);

    app.world_mut().send_event(AnnounceMonster {
        monster: sheep,
        observer: Some(observer),
    });
    step(&mut app, TICK, 1);

    let direct = drain::<DirectPacket>(&mut app);
    assert_eq!(direct.len(), 1);
    assert_eq!(direct[0].observer, observer);
    assert!(matches!(
        direct[0].packet,
        MobPacket::Spawn { entity, mob_type: 91, .. } if entity == sheep
    ));
}
