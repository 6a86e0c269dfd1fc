//! Replication systems: dirty-флаги → минимальный пакет для наблюдателей чанка

use bevy::prelude::*;

use crate::ai::MetaState;
use crate::components::{Monster, Orientation, WorldPosition};
use crate::world::{chunk_of, WorldQuery};

use super::packets::{
    angle_byte, delta_byte, spawn_packet, teleport_packet, AnnounceMonster, ChunkBroadcast,
    ChunkTransfer, DirectPacket, MobPacket,
};
use super::state::ReplicationState;

/// Квадрат максимальной дельты для relative move (4 блока)
pub const MAX_RELATIVE_SQR_DISTANCE: f32 = 16.0;
/// Абсолютная позиция не реже, чем раз в столько секунд
pub const TELEPORT_INTERVAL: f32 = 2.0;

/// Выбирает пакет для текущих dirty-флагов и обновляет снапшот.
///
/// - только ориентация → Look
/// - позиция: дельта > 4 или прошло > 2с с teleport → Teleport
/// - иначе RelativeMoveLook (если ориентация dirty) или RelativeMove
pub fn plan_replication(
    entity: Entity,
    position: Vec3,
    orientation: &Orientation,
    state: &mut ReplicationState,
    now: f32,
) -> Option<MobPacket> {
    if state.orientation_dirty() && !state.position_dirty() {
        state.clear_orientation();
        return Some(MobPacket::Look {
            entity,
            yaw: angle_byte(orientation.yaw),
            pitch: angle_byte(orientation.pitch),
        });
    }

    if !state.position_dirty() {
        return None;
    }

    let diff = position - state.last_replicated;
    let packet = if diff.length_squared() > MAX_RELATIVE_SQR_DISTANCE
        || now - state.last_teleport_at > TELEPORT_INTERVAL
    {
        state.last_teleport_at = now;
        state.clear_orientation();
        teleport_packet(entity, position, orientation)
    } else if state.orientation_dirty() {
        state.clear_orientation();
        MobPacket::RelativeMoveLook {
            entity,
            dx: delta_byte(diff.x),
            dy: delta_byte(diff.y),
            dz: delta_byte(diff.z),
            yaw: angle_byte(orientation.yaw),
            pitch: angle_byte(orientation.pitch),
        }
    } else {
        MobPacket::RelativeMove {
            entity,
            dx: delta_byte(diff.x),
            dy: delta_byte(diff.y),
            dz: delta_byte(diff.z),
        }
    };

    state.last_replicated = position;
    state.clear_position();
    Some(packet)
}

/// Система: репликация движения + перенос между чанками
///
/// Незагруженный чанк: тихий пропуск тика, флаги остаются до следующего.
/// Монстр без spawn-пакета тоже ждёт: дельты без базы наблюдателю не нужны.
pub fn replicate_movement(
    world: Res<WorldQuery>,
    time: Res<Time<Fixed>>,
    mut monsters: Query<(Entity, &WorldPosition, &Orientation, &mut ReplicationState), With<Monster>>,
    mut broadcasts: EventWriter<ChunkBroadcast>,
    mut transfers: EventWriter<ChunkTransfer>,
) {
    let now = time.elapsed_secs();

    for (entity, position, orientation, mut state) in monsters.iter_mut() {
        if !state.announced() || !world.is_chunk_loaded(state.chunk) {
            continue;
        }

        if let Some(packet) = plan_replication(entity, position.0, orientation, &mut state, now) {
            broadcasts.write(ChunkBroadcast {
                chunk: state.chunk,
                packet,
            });
        }

        let current = chunk_of(position.0);
        if current != state.chunk {
            transfers.write(ChunkTransfer {
                entity,
                from: state.chunk,
                to: current,
            });
            state.chunk = current;
        }
    }
}

/// Система: spawn-пакеты для новых монстров и по запросу `AnnounceMonster`
///
/// Новый монстр анонсируется в первый тик, когда его чанк загружен
/// (не обязательно в тик появления). Spawn несёт абсолютную позицию,
/// поэтому сбрасывает базу для дельт.
pub fn announce_monsters(
    world: Res<WorldQuery>,
    time: Res<Time<Fixed>>,
    mut requests: EventReader<AnnounceMonster>,
    mut monsters: Query<(Entity, &Monster, &WorldPosition, &MetaState, &mut ReplicationState)>,
    mut broadcasts: EventWriter<ChunkBroadcast>,
    mut direct: EventWriter<DirectPacket>,
) {
    let now = time.elapsed_secs();

    for (entity, monster, position, meta, mut state) in monsters.iter_mut() {
        if state.announced() || !world.is_chunk_loaded(state.chunk) {
            continue;
        }

        state.mark_announced(position.0, now);
        broadcasts.write(ChunkBroadcast {
            chunk: state.chunk,
            packet: spawn_packet(entity, monster.kind, position.0, meta.is_burning()),
        });
        crate::log(&format!("Spawn {:?} ({:?}) at {:?}", entity, monster.kind, position.0));
    }

    for request in requests.read() {
        let Ok((entity, monster, position, meta, state)) = monsters.get(request.monster) else {
            continue;
        };
        let packet = spawn_packet(entity, monster.kind, position.0, meta.is_burning());

        match request.observer {
            Some(observer) => {
                direct.write(DirectPacket { observer, packet });
            }
            None => {
                if world.is_chunk_loaded(state.chunk) {
                    broadcasts.write(ChunkBroadcast {
                        chunk: state.chunk,
                        packet,
                    });
                }
            }
        }
    }
}
