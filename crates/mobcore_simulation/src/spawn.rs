//! Спавн монстров и игроков
//!
//! Монстр: один bundle со всеми компонентами FSM, физики и репликации.
//! Wolf/Zombie при спавне применяют свой пресет; неизвестный пресет
//! оставляет дефолтные статы (warning в лог).

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{AiState, Brain, Burn, MetaState};
use crate::components::{
    CombatStats, Health, MobBody, MobKind, Monster, Navigation, Orientation, Player, WorldPosition,
};
use crate::config::MonsterPresets;
use crate::replication::ReplicationState;
use crate::world::{VoxelWorld, WorldQuery};

/// Монстр появляется на такой высоте над землёй
pub const SPAWN_HEIGHT_OFFSET: f32 = 1.2;
pub const PLAYER_HEALTH: u32 = 20;

#[derive(Bundle)]
pub struct MonsterBundle {
    pub monster: Monster,
    pub position: WorldPosition,
    pub health: Health,
    pub stats: CombatStats,
    pub body: MobBody,
    pub navigation: Navigation,
    pub orientation: Orientation,
    pub state: AiState,
    pub meta: MetaState,
    pub brain: Brain,
    pub burn: Burn,
    pub replication: ReplicationState,
}

impl MonsterBundle {
    /// Дефолтные статы, destination = точка спавна
    pub fn new(kind: MobKind, position: Vec3) -> Self {
        Self {
            monster: Monster { kind },
            position: WorldPosition(position),
            health: Health::default(),
            stats: CombatStats::default(),
            body: MobBody::default(),
            navigation: Navigation::new(position),
            orientation: Orientation::default(),
            state: AiState::Idle,
            meta: MetaState::Normal,
            brain: Brain::default(),
            burn: Burn::default(),
            replication: ReplicationState::new(position, 0.0),
        }
    }

    /// Применяет пресет вида (если он есть)
    pub fn with_presets(mut self, presets: &MonsterPresets) -> Self {
        if let Some(name) = self.monster.kind.preset_name() {
            if let Err(err) = presets.apply_named_preset(&mut self.stats, &mut self.health, name) {
                crate::log_warning(&format!("{:?}: {}, keeping default stats", self.monster.kind, err));
            }
        }
        self
    }
}

/// Bundle монстра на поверхности колонки (x, z)
pub fn monster_bundle(
    world: &dyn VoxelWorld,
    presets: &MonsterPresets,
    kind: MobKind,
    x: f32,
    z: f32,
) -> MonsterBundle {
    let ground = world.height_at(x.floor() as i32, z.floor() as i32) as f32;
    MonsterBundle::new(kind, Vec3::new(x, ground + SPAWN_HEIGHT_OFFSET, z)).with_presets(presets)
}

/// Спавн напрямую в World (хост, тесты). Нужны WorldQuery и MonsterPresets.
pub fn spawn_monster_in(world: &mut World, kind: MobKind, x: f32, z: f32) -> Entity {
    let bundle = {
        let voxels = world.resource::<WorldQuery>();
        let presets = world.resource::<MonsterPresets>();
        monster_bundle(&**voxels, presets, kind, x, z)
    };
    world.spawn(bundle).id()
}

/// Случайное фермерское животное
pub fn spawn_random_passive_in(world: &mut World, x: f32, z: f32) -> Entity {
    let kind = {
        let mut rng = world.resource_mut::<crate::DeterministicRng>();
        MobKind::random_passive(&mut rng.rng)
    };
    spawn_monster_in(world, kind, x, z)
}

pub fn spawn_player_in(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((Player, WorldPosition(position), Health::new(PLAYER_HEALTH)))
        .id()
}

/// Случайная точка в квадрате [-half, half): для расстановки монстров хостом
pub fn random_spawn_point(rng: &mut impl Rng, half_extent: f32) -> (f32, f32) {
    (
        rng.gen_range(-half_extent..half_extent),
        rng.gen_range(-half_extent..half_extent),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::VoxelGrid;

    #[test]
    fn test_bundle_sits_on_ground() {
        let grid = VoxelGrid::flat(3, 8);
        let presets = MonsterPresets::builtin().unwrap();

        let bundle = monster_bundle(&grid, &presets, MobKind::Pig, 0.5, 0.5);

        assert_eq!(bundle.position.0, Vec3::new(0.5, 4.2, 0.5));
        assert_eq!(bundle.navigation.destination, bundle.position.0);
        assert_eq!(bundle.stats, CombatStats::default());
        assert_eq!(bundle.health.max, 10);
    }

    #[test]
    fn test_hostile_kinds_get_presets() {
        let grid = VoxelGrid::flat(0, 8);
        let presets = MonsterPresets::builtin().unwrap();

        let wolf = monster_bundle(&grid, &presets, MobKind::Wolf, 0.5, 0.5);
        assert_eq!(wolf.stats.attack_damage, 4.0);
        assert_eq!(wolf.health.max, 8);
    }

    #[test]
    fn test_missing_preset_keeps_defaults() {
        let grid = VoxelGrid::flat(0, 8);
        let presets = MonsterPresets::default();

        let zombie = monster_bundle(&grid, &presets, MobKind::Zombie, 0.5, 0.5);
        assert_eq!(zombie.stats, CombatStats::default());
        assert_eq!(zombie.health, Health::new(10));
    }
}
