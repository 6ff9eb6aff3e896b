//! Tests for AI modules.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::modules::{AttackModule, FollowModule, PatrolModule};
    use crate::ai::test_support::MockWorld;
    use crate::config::AgentConfig;

    #[test]
    fn test_module_defaults_from_config() {
        let follow = FollowModule::default();
        let patrol = PatrolModule::default();
        let attack = AttackModule::default();

        assert!(follow.enabled);
        assert_eq!(follow.detection_radius, 5.0);
        assert!(!patrol.enabled);
        assert_eq!(patrol.patrol_delay, 2.0);
        assert!(!attack.enabled);
        assert_eq!(attack.attack_range, 0.5);
        assert_eq!(attack.attack_delay, 1.0);
        assert_eq!(attack.attack_damage, 10.0);
    }

    #[test]
    fn test_validate_target_clears_despawned() {
        let mut world = MockWorld::default();
        let target = world.spawn_target(Vec2::new(1.0, 0.0), 10.0);

        let mut follow = FollowModule::default();
        follow.primary_target = Some(target);
        assert_eq!(follow.validate_target(&world), Some(target));

        world.despawn(target);
        assert_eq!(follow.validate_target(&world), None);
        assert_eq!(follow.primary_target, None);
    }

    #[test]
    fn test_attack_requires_cooldown_range_and_damageable() {
        let mut world = MockWorld::default();
        let target = world.spawn_target(Vec2::new(0.4, 0.0), 10.0);
        let dummy = world.spawn_waypoint(Vec2::new(0.2, 0.0));

        let config = AgentConfig {
            attack_enabled: true,
            ..default()
        };
        let mut attack = AttackModule::from_config(&config);
        attack.last_attack_time = 10.0;

        // Cooldown
        assert!(!attack.can_attack(Vec2::ZERO, target, 10.5, &world));
        assert!(attack.can_attack(Vec2::ZERO, target, 11.0, &world));

        // Дистанция
        assert!(!attack.can_attack(Vec2::new(-1.0, 0.0), target, 11.0, &world));

        // Без Damageable (waypoint)
        assert!(!attack.can_attack(Vec2::ZERO, dummy, 11.0, &world));
    }
}
