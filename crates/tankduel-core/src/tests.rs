#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;

    use crate::components::Transform;
    use crate::enums::*;
    use crate::input::{InputEvent, Key};
    use crate::state::{GameSnapshot, TankView};
    use crate::tables::{pickup_data, projectile_data, tank_data};
    use crate::types::SimTime;

    #[test]
    fn test_category_routing() {
        assert!(Category::ANY_TANK.intersects(Category::PLAYER1_TANK));
        assert!(Category::ANY_TANK.intersects(Category::PLAYER2_TANK));
        assert!(!Category::PLAYER1_TANK.intersects(Category::PLAYER2_TANK));
        assert!(!Category::SCENE.intersects(Category::PROJECTILE | Category::PICKUP));
        assert_eq!(PlayerId::One.category(), Category::PLAYER1_TANK);
        assert_eq!(PlayerId::Two.category(), Category::PLAYER2_TANK);
    }

    /// The rotation and the unit vector of a facing must describe the same angle.
    #[test]
    fn test_direction_rotation_matches_unit_vector() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let angle = dir.rotation().to_radians();
            let from_angle = Vec2::new(angle.cos(), angle.sin());
            assert!(
                (from_angle - dir.unit_vector()).length() < 1e-5,
                "{dir:?}: {from_angle:?} vs {:?}",
                dir.unit_vector()
            );
        }
    }

    #[test]
    fn test_realtime_actions() {
        let realtime: Vec<_> = PlayerAction::ALL
            .into_iter()
            .filter(|a| a.is_realtime())
            .collect();
        assert_eq!(realtime.len(), 5);
        assert!(!PlayerAction::LaunchMissile.is_realtime());
        assert_eq!(PlayerAction::MoveUp.direction(), Some(Direction::Up));
        assert_eq!(PlayerAction::Fire.direction(), None);
    }

    #[test]
    fn test_tank_table_lookup() {
        let p1 = tank_data(TankType::Player1Tank);
        let p2 = tank_data(TankType::Player2Tank);
        assert_eq!(p1.texture, TextureId::Player1Tank);
        assert_eq!(p2.texture, TextureId::Player2Tank);
        assert!(p1.hitpoints > 0);
        assert!(p1.fire_interval > Duration::ZERO);
    }

    #[test]
    fn test_projectile_and_pickup_tables() {
        assert!(
            projectile_data(ProjectileType::ExplosiveShell).damage
                > projectile_data(ProjectileType::Bullet).damage
        );
        assert_eq!(
            projectile_data(ProjectileType::Missile).texture,
            TextureId::Missile
        );
        for pickup in PickupType::ALL {
            assert!(pickup_data(pickup).radius > 0.0);
        }
        assert_eq!(
            pickup_data(PickupType::FireRate).texture,
            TextureId::FireRate
        );
    }

    #[test]
    fn test_transform_to_affine() {
        let t = Transform {
            position: Vec2::new(10.0, 20.0),
            rotation: 90.0,
            scale: Vec2::splat(2.0),
        };
        let p = t.to_affine().transform_point2(Vec2::new(1.0, 0.0));
        assert!((p - Vec2::new(10.0, 22.0)).length() < 1e-4, "got {p:?}");
        assert_eq!(
            Transform::IDENTITY.to_affine(),
            glam::Affine2::IDENTITY
        );
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..10 {
            time.advance(Duration::from_millis(100));
        }
        assert_eq!(time.tick, 10);
        assert_eq!(time.elapsed, Duration::from_secs(1));
    }

    /// Input events use an adjacently tagged layout in config files.
    #[test]
    fn test_input_event_json_shape() {
        let json = serde_json::to_string(&InputEvent::KeyPressed(Key::Space)).unwrap();
        assert_eq!(json, r#"{"type":"KeyPressed","key":"Space"}"#);
        let back: InputEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.key(), Key::Space);
    }

    #[test]
    fn test_snapshot_tank_lookup() {
        let snapshot = GameSnapshot {
            tanks: vec![TankView::destroyed(PlayerId::One), TankView::destroyed(PlayerId::Two)],
            ..Default::default()
        };
        let p2 = snapshot.tank(PlayerId::Two).unwrap();
        assert_eq!(p2.hitpoints, 0);
        assert!(!p2.alive);
        assert_eq!(p2.facing, Direction::Up);
    }
}
