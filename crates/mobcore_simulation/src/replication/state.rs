//! Replication state монстра: dirty-флаги + последний отправленный снапшот
//!
//! Флаги ставят только `relocate` / `reorient` (единственные мутаторы
//! позиции и ориентации монстра), снимает только replicator.
//! Пока монстр не анонсирован spawn-пакетом, дельты по нему не шлются.

use bevy::prelude::*;

use crate::components::{Orientation, WorldPosition};
use crate::world::chunk_of;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ReplicationState {
    dirty_position: bool,
    dirty_orientation: bool,
    announced: bool,
    /// Позиция на момент последнего position-пакета
    pub last_replicated: Vec3,
    /// Время (Time<Fixed>::elapsed) последнего teleport-пакета
    pub last_teleport_at: f32,
    /// Чанк, в котором монстр зарегистрирован
    pub chunk: IVec3,
}

impl ReplicationState {
    pub fn new(position: Vec3, now: f32) -> Self {
        Self {
            dirty_position: false,
            dirty_orientation: false,
            announced: false,
            last_replicated: position,
            last_teleport_at: now,
            chunk: chunk_of(position),
        }
    }

    pub fn position_dirty(&self) -> bool {
        self.dirty_position
    }

    pub fn orientation_dirty(&self) -> bool {
        self.dirty_orientation
    }

    /// Наблюдатели чанка уже получили spawn-пакет
    pub fn announced(&self) -> bool {
        self.announced
    }

    /// Spawn-пакет ушёл: абсолютная позиция становится базой для дельт.
    /// Ориентацию spawn не несёт, её флаг остаётся.
    pub(crate) fn mark_announced(&mut self, position: Vec3, now: f32) {
        self.announced = true;
        self.dirty_position = false;
        self.last_replicated = position;
        self.last_teleport_at = now;
    }

    pub(crate) fn mark_position_dirty(&mut self) {
        self.dirty_position = true;
    }

    pub(crate) fn mark_orientation_dirty(&mut self) {
        self.dirty_orientation = true;
    }

    pub(crate) fn clear_position(&mut self) {
        self.dirty_position = false;
    }

    pub(crate) fn clear_orientation(&mut self) {
        self.dirty_orientation = false;
    }

    /// Перемещает монстра и помечает позицию dirty
    pub fn relocate(&mut self, position: &mut WorldPosition, to: Vec3) {
        position.0 = to;
        self.mark_position_dirty();
    }

    /// Меняет ориентацию; dirty только если значение реально изменилось
    pub fn reorient(&mut self, orientation: &mut Orientation, to: Orientation) -> bool {
        if *orientation == to {
            return false;
        }
        *orientation = to;
        self.mark_orientation_dirty();
        true
    }
}
