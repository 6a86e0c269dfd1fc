//! Конфигурация: пресеты монстров + настройки headless симуляции
//!
//! Пресеты: TOML таблица `имя → tunables`. Встроенный набор лежит в
//! `assets/monsters.toml`, хост может подложить свой файл через настройки.
//! Неизвестное имя пресета не фатально: статы остаются дефолтными.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::components::{CombatStats, Health};
use crate::logger::LogLevel;

const BUILTIN_PRESETS: &str = include_str!("../../assets/monsters.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown monster preset `{0}`")]
    UnknownPreset(String),
}

/// Один пресет (секция TOML). Пропущенные поля берутся из `CombatStats::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonsterPreset {
    pub attack_damage: f32,
    pub attack_range: f32,
    pub attack_rate: f32,
    pub sight_distance: f32,
    pub max_health: Option<u32>,
}

impl Default for MonsterPreset {
    fn default() -> Self {
        let stats = CombatStats::default();
        Self {
            attack_damage: stats.attack_damage,
            attack_range: stats.attack_range,
            attack_rate: stats.attack_rate,
            sight_distance: stats.sight_distance,
            max_health: None,
        }
    }
}

/// Resource: все известные пресеты по имени
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MonsterPresets {
    presets: HashMap<String, MonsterPreset>,
}

impl MonsterPresets {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Встроенный набор (assets/monsters.toml)
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_PRESETS)
    }

    pub fn get(&self, name: &str) -> Option<&MonsterPreset> {
        self.presets.get(name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Применяет пресет к статам (и max health, если задан).
    ///
    /// При `UnknownPreset` ничего не меняется.
    pub fn apply_named_preset(
        &self,
        stats: &mut CombatStats,
        health: &mut Health,
        name: &str,
    ) -> Result<(), ConfigError> {
        let preset = self
            .get(name)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;

        stats.attack_damage = preset.attack_damage;
        stats.attack_range = preset.attack_range;
        stats.attack_rate = preset.attack_rate;
        stats.sight_distance = preset.sight_distance;
        if let Some(max) = preset.max_health {
            *health = Health::new(max);
        }
        Ok(())
    }
}

/// Настройки headless симуляции (mobcore.toml)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub seed: u64,
    pub tick_hz: f64,
    pub log_level: LogLevel,
    /// Свой файл пресетов вместо встроенного
    pub presets_path: Option<PathBuf>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_hz: 20.0,
            log_level: LogLevel::Info,
            presets_path: None,
        }
    }
}

impl SimulationSettings {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Читает файл настроек; отсутствующий файл → дефолты
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(source) => Self::from_toml_str(&source),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Пресеты по настройкам: свой файл или встроенные
    pub fn load_presets(&self) -> Result<MonsterPresets, ConfigError> {
        match &self.presets_path {
            Some(path) => MonsterPresets::load(path),
            None => MonsterPresets::builtin(),
        }
    }
}
