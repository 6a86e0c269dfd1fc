//! Burning meta-state: поджог от огня/лавы, периодический урон, затухание.

use bevy::prelude::*;

use crate::ai::{Burn, MetaState};
use crate::combat::{DamageRequest, Dying};
use crate::components::WorldPosition;
use crate::replication::{ChunkBroadcast, MobPacket, ReplicationState};
use crate::world::{touches_fire, WorldQuery};

/// Урон раз в столько секунд
pub const BURN_INTERVAL: f32 = 1.0;
/// После стольких циклов горение гаснет
pub const BURN_CYCLES: u32 = 8;
pub const BURN_DAMAGE: u32 = 1;
/// Урон, если всё ещё стоим в огне/лаве
pub const FIRE_CONTACT_DAMAGE: u32 = 6;

/// Система: горение
///
/// Сначала тик уже горящих, потом проверка поджога, поэтому тик поджога
/// урона не наносит. Урон без instigator (не становится целью).
pub fn tick_burning(
    world: Res<WorldQuery>,
    time: Res<Time<Fixed>>,
    mut monsters: Query<(Entity, &WorldPosition, &mut MetaState, &mut Burn, &ReplicationState), Without<Dying>>,
    mut damage: EventWriter<DamageRequest>,
    mut broadcasts: EventWriter<ChunkBroadcast>,
) {
    let dt = time.delta_secs();

    for (entity, position, mut meta, mut burn, replication) in monsters.iter_mut() {
        let in_fire = touches_fire(&**world, position.0);

        if meta.is_burning() {
            burn.fire_timer += dt;
            if burn.fire_timer < BURN_INTERVAL {
                continue;
            }
            burn.fire_timer = 0.0;

            damage.write(DamageRequest {
                target: entity,
                amount: if in_fire { FIRE_CONTACT_DAMAGE } else { BURN_DAMAGE },
                instigator: None,
            });

            burn.cycles += 1;
            if burn.cycles >= BURN_CYCLES {
                burn.cycles = 0;
                *meta = MetaState::Normal;
                if world.is_chunk_loaded(replication.chunk) {
                    broadcasts.write(ChunkBroadcast {
                        chunk: replication.chunk,
                        packet: MobPacket::Metadata { entity, burning: false },
                    });
                }
                crate::log(&format!("🔥 {:?} stopped burning", entity));
            }
        } else if burn.burnable && in_fire && world.is_chunk_loaded(replication.chunk) {
            *meta = MetaState::Burning;
            burn.fire_timer = 0.0;
            broadcasts.write(ChunkBroadcast {
                chunk: replication.chunk,
                packet: MobPacket::Metadata { entity, burning: true },
            });
            crate::log(&format!("🔥 {:?} caught fire", entity));
        }
    }
}
