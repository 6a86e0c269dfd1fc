//! Replication: синхронизация монстров с наблюдателями
//!
//! Dirty position/orientation → Look / Teleport / RelativeMove(Look),
//! плюс spawn-анонсы и перенос между чанками.

use bevy::prelude::*;

pub mod packets;
pub mod state;
pub mod systems;

pub use packets::*;
pub use state::ReplicationState;
pub use systems::{announce_monsters, plan_replication, replicate_movement};

use crate::MonsterTick;

/// Replication Plugin
///
/// Порядок выполнения (MonsterTick::Replication):
/// 1. announce_monsters: spawn для новых + по запросу
/// 2. replicate_movement: пакеты движения, смена чанка
pub struct ReplicationPlugin;

impl Plugin for ReplicationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ChunkBroadcast>()
            .add_event::<DirectPacket>()
            .add_event::<ChunkTransfer>()
            .add_event::<AnnounceMonster>();

        app.add_systems(
            FixedUpdate,
            (announce_monsters, replicate_movement)
                .chain()
                .in_set(MonsterTick::Replication),
        );
    }
}
