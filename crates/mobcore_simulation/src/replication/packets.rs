//! Пакеты синхронизации монстров и их wire-кодирование
//!
//! Транспорт и фрейминг: снаружи: симуляция только пишет события
//! `ChunkBroadcast` / `DirectPacket`, хост рассылает их наблюдателям.

use bevy::prelude::*;

use crate::components::{MobKind, Orientation};

/// Fixed-point масштаб позиции (1 блок = 32 единицы)
pub const FIXED_POINT_SCALE: f32 = 32.0;

/// Metadata байт: ничего не горит / горит
pub const METADATA_NORMAL: u8 = 0x00;
pub const METADATA_BURNING: u8 = 0x01;

#[derive(Debug, Clone, PartialEq)]
pub enum MobPacket {
    /// Появление монстра у наблюдателя
    Spawn {
        entity: Entity,
        mob_type: u8,
        position: IVec3,
        yaw: i8,
        pitch: i8,
        metadata: u8,
    },
    /// Абсолютная позиция + ориентация
    Teleport {
        entity: Entity,
        position: IVec3,
        yaw: i8,
        pitch: i8,
    },
    Look {
        entity: Entity,
        yaw: i8,
        pitch: i8,
    },
    /// Дельта позиции в fixed-point (±4 блока)
    RelativeMove {
        entity: Entity,
        dx: i8,
        dy: i8,
        dz: i8,
    },
    RelativeMoveLook {
        entity: Entity,
        dx: i8,
        dy: i8,
        dz: i8,
        yaw: i8,
        pitch: i8,
    },
    Metadata {
        entity: Entity,
        burning: bool,
    },
}

impl MobPacket {
    pub fn entity(&self) -> Entity {
        match self {
            MobPacket::Spawn { entity, .. }
            | MobPacket::Teleport { entity, .. }
            | MobPacket::Look { entity, .. }
            | MobPacket::RelativeMove { entity, .. }
            | MobPacket::RelativeMoveLook { entity, .. }
            | MobPacket::Metadata { entity, .. } => *entity,
        }
    }
}

/// Event: пакет всем наблюдателям чанка
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ChunkBroadcast {
    pub chunk: IVec3,
    pub packet: MobPacket,
}

/// Event: пакет одному наблюдателю
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DirectPacket {
    pub observer: Entity,
    pub packet: MobPacket,
}

/// Event: монстр пересёк границу чанка (для внешнего реестра)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ChunkTransfer {
    pub entity: Entity,
    pub from: IVec3,
    pub to: IVec3,
}

/// Запрос: повторно отправить spawn монстра
///
/// `observer: None`: broadcast в чанк монстра.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnnounceMonster {
    pub monster: Entity,
    pub observer: Option<Entity>,
}

/// Позиция → fixed-point (усечение к нулю)
pub fn fixed_point(position: Vec3) -> IVec3 {
    (position * FIXED_POINT_SCALE).as_ivec3()
}

/// Дельта оси → байт (насыщение на границах i8)
pub fn delta_byte(delta: f32) -> i8 {
    (delta * FIXED_POINT_SCALE) as i8
}

/// Угол в градусах → 1/256 оборота (с переполнением, как 8-битный угол)
pub fn angle_byte(degrees: f32) -> i8 {
    ((degrees / 360.0) * 256.0) as i32 as i8
}

pub fn spawn_packet(entity: Entity, kind: MobKind, position: Vec3, burning: bool) -> MobPacket {
    MobPacket::Spawn {
        entity,
        mob_type: kind.type_id(),
        position: fixed_point(position),
        yaw: 0,
        pitch: 0,
        metadata: if burning { METADATA_BURNING } else { METADATA_NORMAL },
    }
}

pub fn teleport_packet(entity: Entity, position: Vec3, orientation: &Orientation) -> MobPacket {
    MobPacket::Teleport {
        entity,
        position: fixed_point(position),
        yaw: angle_byte(orientation.yaw),
        pitch: angle_byte(orientation.pitch),
    }
}
