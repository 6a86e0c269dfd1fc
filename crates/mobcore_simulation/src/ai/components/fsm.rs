//! FSM AI components (behavioral state, meta-state, brain, burn).

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use thiserror::Error;

/// Поведенческое состояние монстра (ровно одно активно)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum AiState {
    /// Бродит случайно, ищет игрока
    #[default]
    Idle,
    /// Цель видна, работает pursuit вида
    Chasing,
    /// Убегает от цели
    Escaping,
    /// Цель в радиусе атаки
    Attacking,
}

impl AiState {
    pub fn name(self) -> &'static str {
        match self {
            AiState::Idle => "Idle",
            AiState::Chasing => "Chasing",
            AiState::Escaping => "Escaping",
            AiState::Attacking => "Attacking",
        }
    }
}

impl fmt::Display for AiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateNameError {
    #[error("invalid state `{0}`")]
    Unknown(String),
}

impl FromStr for AiState {
    type Err = StateNameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "Idle" => Ok(AiState::Idle),
            "Chasing" => Ok(AiState::Chasing),
            "Escaping" => Ok(AiState::Escaping),
            "Attacking" => Ok(AiState::Attacking),
            _ => Err(StateNameError::Unknown(name.to_string())),
        }
    }
}

/// Debug: выставить состояние по имени.
///
/// Неизвестное имя → warning в лог, состояние не меняется.
pub fn set_state_by_name(state: &mut AiState, name: &str) -> Result<(), StateNameError> {
    match name.parse() {
        Ok(parsed) => {
            *state = parsed;
            Ok(())
        }
        Err(err) => {
            crate::log_warning(&format!("set_state_by_name: {}", err));
            Err(err)
        }
    }
}

/// Мета-состояние окружения (ортогонально AiState)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum MetaState {
    #[default]
    Normal,
    Burning,
}

impl MetaState {
    pub fn is_burning(self) -> bool {
        matches!(self, MetaState::Burning)
    }
}

/// Память AI: цель + накопители таймеров
///
/// `target`: только id. Живость проверяется через Query::get каждый тик,
/// despawn цели = потеря игрока.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Brain {
    pub target: Option<Entity>,
    /// Накопитель Idle (случайное блуждание раз в секунду)
    pub idle_timer: f32,
    /// Накопитель атаки (Δt × attack_rate)
    pub attack_interval: f32,
}

/// "see player": цель найдена, Idle → Chasing
pub fn see_player(brain: &mut Brain, state: &mut AiState, player: Entity) {
    brain.target = Some(player);
    *state = AiState::Chasing;
}

/// "lose player": отпускает цель и возвращает в Idle.
///
/// Идемпотентно: без цели просто остаёмся в Idle, `None`.
pub fn lose_player(brain: &mut Brain, state: &mut AiState) -> Option<Entity> {
    *state = AiState::Idle;
    brain.target.take()
}

/// Горение: накопитель урона и счётчик циклов
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Burn {
    /// Может ли загореться вообще
    pub burnable: bool,
    pub fire_timer: f32,
    pub cycles: u32,
}

impl Default for Burn {
    fn default() -> Self {
        Self {
            burnable: true,
            fire_timer: 0.0,
            cycles: 0,
        }
    }
}
