//! Tests for damage systems.

#[cfg(test)]
mod tests {
    use crate::ai::{AiState, Brain};
    use crate::combat::{apply_damage, DamageDealt, DamageRequest, Dying, EntityDied};
    use crate::components::{Health, MobKind, Monster, Navigation};
    use bevy::prelude::*;

    fn damage_app() -> App {
        let mut app = App::new();
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_systems(Update, apply_damage);
        app
    }

    fn spawn_mob(app: &mut App, kind: MobKind, hp: u32) -> Entity {
        app.world_mut()
            .spawn((
                Monster { kind },
                Health::new(hp),
                Brain::default(),
                AiState::Idle,
                Navigation::default(),
            ))
            .id()
    }

    fn hit(app: &mut App, target: Entity, amount: u32, instigator: Option<Entity>) {
        app.world_mut().send_event(DamageRequest {
            target,
            amount,
            instigator,
        });
        app.update();
    }

    #[test]
    fn test_skittish_mob_escapes_attacker() {
        let mut app = damage_app();
        let player = app.world_mut().spawn(Health::new(20)).id();
        let pig = spawn_mob(&mut app, MobKind::Pig, 10);

        hit(&mut app, pig, 3, Some(player));

        let world = app.world();
        assert_eq!(world.get::<Health>(pig).unwrap().current, 7);
        assert_eq!(*world.get::<AiState>(pig).unwrap(), AiState::Escaping);
        assert_eq!(world.get::<Brain>(pig).unwrap().target, Some(player));

        let dealt: Vec<_> = app.world_mut().resource_mut::<Events<DamageDealt>>().drain().collect();
        assert_eq!(dealt.len(), 1);
        assert_eq!(dealt[0].damage, 3);
        assert!(!dealt[0].target_died);
    }

    #[test]
    fn test_hostile_mob_chases_attacker() {
        let mut app = damage_app();
        let player = app.world_mut().spawn(Health::new(20)).id();
        let wolf = spawn_mob(&mut app, MobKind::Wolf, 8);

        hit(&mut app, wolf, 1, Some(player));

        assert_eq!(*app.world().get::<AiState>(wolf).unwrap(), AiState::Chasing);
        assert_eq!(app.world().get::<Brain>(wolf).unwrap().target, Some(player));
    }

    #[test]
    fn test_environment_damage_keeps_target() {
        let mut app = damage_app();
        let cow = spawn_mob(&mut app, MobKind::Cow, 10);

        hit(&mut app, cow, 1, None);
        // Урон "от себя" тоже не делает себя целью
        hit(&mut app, cow, 1, Some(cow));

        let world = app.world();
        assert_eq!(world.get::<Health>(cow).unwrap().current, 8);
        assert_eq!(*world.get::<AiState>(cow).unwrap(), AiState::Idle);
        assert_eq!(world.get::<Brain>(cow).unwrap().target, None);
    }

    #[test]
    fn test_killing_blow_starts_countdown() {
        let mut app = damage_app();
        let player = app.world_mut().spawn(Health::new(20)).id();
        let hen = spawn_mob(&mut app, MobKind::Hen, 2);
        app.world_mut().get_mut::<Navigation>(hen).unwrap().move_to(Vec3::X);

        hit(&mut app, hen, 5, Some(player));

        let world = app.world();
        assert_eq!(world.get::<Health>(hen).unwrap().current, 0);
        assert_eq!(world.get::<Dying>(hen), Some(&Dying { elapsed: 0.0 }));
        assert!(!world.get::<Navigation>(hen).unwrap().moving);

        let died: Vec<_> = app.world_mut().resource_mut::<Events<EntityDied>>().drain().collect();
        assert_eq!(died, vec![EntityDied { entity: hen, killer: Some(player) }]);

        // Мертвому урон больше не засчитывается
        app.world_mut().resource_mut::<Events<DamageDealt>>().clear();
        hit(&mut app, hen, 1, Some(player));
        assert_eq!(app.world_mut().resource_mut::<Events<DamageDealt>>().drain().count(), 0);
    }

    #[test]
    fn test_player_death_has_no_countdown() {
        let mut app = damage_app();
        let wolf = spawn_mob(&mut app, MobKind::Wolf, 8);
        let player = app.world_mut().spawn(Health::new(4)).id();

        hit(&mut app, player, 4, Some(wolf));

        assert!(app.world().get::<Dying>(player).is_none());
        let died: Vec<_> = app.world_mut().resource_mut::<Events<EntityDied>>().drain().collect();
        assert_eq!(died.len(), 1);
        assert_eq!(died[0].killer, Some(wolf));
    }
}
