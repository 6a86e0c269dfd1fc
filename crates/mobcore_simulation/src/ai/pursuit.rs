//! Pursuit: поведение вида в Chasing
//!
//! FSM вызывает `pursue` одинаково для всех видов, различие: в реализации.
//! Базовое поведение ничего не делает.

use bevy::prelude::*;

use crate::ai::AiState;
use crate::components::{CombatStats, MobKind, Navigation, Temperament};

/// Всё, что pursuit видит и может менять за тик
pub struct PursuitContext<'a> {
    pub position: Vec3,
    /// Позиция цели, если цель ещё существует
    pub target: Option<Vec3>,
    pub stats: &'a CombatStats,
    pub state: &'a mut AiState,
    pub navigation: &'a mut Navigation,
}

pub trait Pursuit: Send + Sync {
    fn pursue(&self, _ctx: &mut PursuitContext) {}
}

/// Фермерские животные: в Chasing стоят на месте
pub struct Indifferent;

impl Pursuit for Indifferent {}

/// Хищники: идут к цели, в радиусе атаки переходят в Attacking
pub struct Stalker;

impl Pursuit for Stalker {
    fn pursue(&self, ctx: &mut PursuitContext) {
        let Some(target) = ctx.target else {
            return;
        };

        if (target - ctx.position).length() <= ctx.stats.attack_range {
            *ctx.state = AiState::Attacking;
        } else {
            ctx.navigation.move_to(target);
        }
    }
}

pub fn pursuit_for(kind: MobKind) -> &'static dyn Pursuit {
    match kind.temperament() {
        Temperament::Hostile => &Stalker,
        Temperament::Skittish => &Indifferent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(pursuit: &dyn Pursuit, position: Vec3, target: Option<Vec3>) -> (AiState, Navigation) {
        let stats = CombatStats::default();
        let mut state = AiState::Chasing;
        let mut navigation = Navigation::new(position);
        let mut ctx = PursuitContext {
            position,
            target,
            stats: &stats,
            state: &mut state,
            navigation: &mut navigation,
        };
        pursuit.pursue(&mut ctx);
        (state, navigation)
    }

    #[test]
    fn test_indifferent_is_noop() {
        let (state, nav) = run(pursuit_for(MobKind::Pig), Vec3::ZERO, Some(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(state, AiState::Chasing);
        assert!(!nav.moving);
    }

    #[test]
    fn test_stalker_closes_distance() {
        let target = Vec3::new(10.0, 1.2, 0.0);
        let (state, nav) = run(pursuit_for(MobKind::Wolf), Vec3::new(0.0, 1.2, 0.0), Some(target));
        assert_eq!(state, AiState::Chasing);
        assert!(nav.moving);
        assert_eq!(nav.destination, target);
    }

    #[test]
    fn test_stalker_attacks_in_range() {
        // attack_range по умолчанию 5
        let (state, nav) = run(&Stalker, Vec3::ZERO, Some(Vec3::new(4.0, 0.0, 0.0)));
        assert_eq!(state, AiState::Attacking);
        assert!(!nav.moving);
    }

    #[test]
    fn test_stalker_without_target_waits() {
        let (state, nav) = run(&Stalker, Vec3::ZERO, None);
        assert_eq!(state, AiState::Chasing);
        assert!(!nav.moving);
    }
}
