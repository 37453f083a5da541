use super::*;

fn assert_invariant_violation(mutator: impl FnOnce(&mut World), expected: WorldRule) {
    let mut world = World::generate(0xDEAD_BEEF);
    mutator(&mut world);
    assert_eq!(world.validate_invariants(), Err(expected));
}

fn resting_world() -> World {
    let mut world = World::generate(7);
    world.player.velocity = Vec2::ZERO;
    world
}

#[test]
fn generated_world_has_fixed_entity_counts() {
    let world = World::generate(0x1234_5678);
    assert_eq!(world.asteroids().len(), ASTEROID_COUNT);
    assert_eq!(world.stars().len(), STAR_COUNT);
    assert!(world.shots().is_empty());
    assert_eq!(world.frame_count(), 0);
    world
        .validate_invariants()
        .expect("generated world must be valid");
}

#[test]
fn generated_asteroids_respect_speed_and_spot_ranges() {
    for seed in [1u32, 0xDEAD_BEEF, 0xC0FF_EE11, 0x1234_5678] {
        let world = World::generate(seed);
        for asteroid in world.asteroids() {
            assert!((0.0..0.2).contains(&asteroid.velocity.x));
            assert!((0.0..0.2).contains(&asteroid.velocity.y));
            assert!(asteroid.spots.len() <= 15);
            for spot in &asteroid.spots {
                assert!((0.0..1.0).contains(&spot.x));
                assert!((0.0..1.0).contains(&spot.y));
            }
        }
    }
}

#[test]
fn same_seed_generates_identical_worlds() {
    assert_eq!(World::generate(99), World::generate(99));
    assert_ne!(World::generate(99), World::generate(100));
}

#[test]
fn player_spawns_centered_and_drifting_right() {
    let world = World::generate(3);
    assert_eq!(world.player().position, Vec2::new(0.5, 0.5));
    assert_eq!(world.player().velocity, Vec2::new(0.01, 0.0));
    assert_eq!(world.player().facing, world.player().velocity);
}

#[test]
fn directional_keys_step_velocity() {
    let mut world = resting_world();
    world.apply_key(Key::Right);
    world.apply_key(Key::Right);
    world.apply_key(Key::Up);
    assert!((world.player().velocity.x - 0.02).abs() < 1e-12);
    assert!((world.player().velocity.y + 0.01).abs() < 1e-12);

    world.apply_key(Key::Down);
    world.apply_key(Key::Down);
    world.apply_key(Key::Left);
    assert!((world.player().velocity.x - 0.01).abs() < 1e-12);
    assert!((world.player().velocity.y - 0.01).abs() < 1e-12);
}

#[test]
fn repeated_thrust_never_exceeds_speed_clamp() {
    let mut world = resting_world();
    for key in [Key::Right, Key::Down] {
        for _ in 0..100 {
            world.apply_key(key);
            assert!(world.player().velocity.x <= PLAYER_MAX_SPEED);
            assert!(world.player().velocity.y <= PLAYER_MAX_SPEED);
        }
    }
    assert_eq!(world.player().velocity, Vec2::new(0.2, 0.2));

    for key in [Key::Left, Key::Up] {
        for _ in 0..100 {
            world.apply_key(key);
            assert!(world.player().velocity.x >= -PLAYER_MAX_SPEED);
            assert!(world.player().velocity.y >= -PLAYER_MAX_SPEED);
        }
    }
    assert_eq!(world.player().velocity, Vec2::new(-0.2, -0.2));
    world
        .validate_invariants()
        .expect("clamped velocity must satisfy invariants");
}

#[test]
fn fire_uses_current_position_and_unit_heading() {
    let mut world = World::generate(11);
    world.player.velocity = Vec2::new(0.0, 0.1);
    world.player.position = Vec2::new(0.25, 0.75);
    assert!(world.apply_key(Key::Fire));

    let shot = world.shots()[0];
    assert_eq!(shot.position, Vec2::new(0.25, 0.75));
    assert!(shot.velocity.x.abs() < 1e-12);
    assert!((shot.velocity.y - 1.0).abs() < 1e-12);
    assert!((shot.velocity.length() - 1.0).abs() < 1e-12);
    assert_eq!(world.shots_fired(), 1);
}

#[test]
fn resting_ship_fires_rightward() {
    let mut world = World::generate(5);
    // 0.01 - 0.01 is exactly zero.
    world.apply_key(Key::Left);
    assert!(world.player().velocity.is_zero());
    world.apply_key(Key::Fire);
    assert_eq!(world.shots()[0].velocity, Vec2::new(1.0, 0.0));
}

#[test]
fn facing_keeps_last_nonzero_velocity() {
    let mut world = World::generate(5);
    world.apply_key(Key::Down);
    world.apply_key(Key::Left);
    assert_eq!(world.player().facing, Vec2::new(0.0, 0.01));
    world.apply_key(Key::Up);
    assert!(world.player().velocity.is_zero());
    assert_eq!(world.player().facing, Vec2::new(0.0, 0.01));
}

#[test]
fn one_fire_per_drain_is_honoured() {
    let mut world = World::generate(8);
    let mut queue = InputQueue::new();
    queue.push_identifier(" ");
    queue.push_identifier("d");
    queue.push_identifier(" ");
    queue.push_identifier(" ");
    queue.push_identifier("Shift");

    let outcome = world.apply_input(&mut queue);
    assert_eq!(
        outcome,
        InputOutcome {
            applied: 2,
            fired: true,
            fire_dropped: 2,
        }
    );
    assert_eq!(world.shots().len(), 1);
    assert!(queue.is_empty());
    assert!((world.player().velocity.x - 0.02).abs() < 1e-12);
}

#[test]
fn expired_shot_is_removed_and_order_is_kept() {
    let mut world = World::generate(4);
    world.shots = vec![
        Shot {
            position: Vec2::new(0.1, 0.1),
            velocity: Vec2::new(1.0, 0.0),
        },
        Shot {
            position: Vec2::new(0.99, 0.5),
            velocity: Vec2::new(1.0, 0.0),
        },
        Shot {
            position: Vec2::new(0.2, 0.2),
            velocity: Vec2::new(0.0, 1.0),
        },
    ];

    let report = world.advance(0.02);
    assert_eq!(report.shots_culled, 1);
    assert_eq!(world.shots().len(), 2);
    assert!((world.shots()[0].position.x - 0.12).abs() < 1e-12);
    assert!((world.shots()[1].position.y - 0.22).abs() < 1e-12);
}

#[test]
fn advance_moves_asteroids_and_player_with_wrap() {
    let mut world = World::generate(21);
    let before = world.clone();
    world.advance(0.5);

    for (old, new) in before.asteroids().iter().zip(world.asteroids()) {
        assert_eq!(
            new.position,
            wrap_advance(old.position, old.velocity, 0.5)
        );
        assert_eq!(new.spots, old.spots);
    }
    assert_eq!(
        world.player().position,
        wrap_advance(before.player().position, before.player().velocity, 0.5)
    );
    assert_eq!(world.stars(), before.stars());
    assert_eq!(world.frame_count(), 1);
}

#[test]
fn shot_collection_grows_by_at_most_one_per_tick() {
    let mut world = World::generate(0xC0FF_EE11);
    let mut queue = InputQueue::new();
    for frame in 0..240u32 {
        let before = world.shots().len();
        for _ in 0..(frame % 4) {
            queue.push(Key::Fire);
        }
        world.apply_input(&mut queue);
        world.advance(1.0 / 60.0);
        assert_eq!(validate_shot_growth(before, world.shots().len()), Ok(()));
    }
}

#[test]
fn checkpoint_mirrors_player_state() {
    let mut world = World::generate(12);
    world.apply_key(Key::Fire);
    world.advance(0.1);
    let checkpoint = world.checkpoint(false);
    assert_eq!(checkpoint.frame_count, 1);
    assert_eq!(checkpoint.player_x, world.player().position.x);
    assert_eq!(checkpoint.player_vy, world.player().velocity.y);
    assert_eq!(checkpoint.shots, world.shots().len());
    assert_eq!(checkpoint.shots_fired, 1);
    assert!(!checkpoint.halted);
}

#[test]
fn invariant_checks_report_expected_rules() {
    assert_invariant_violation(
        |world| world.player.position.x = 1.5,
        WorldRule::PlayerBounds,
    );
    assert_invariant_violation(
        |world| world.player.velocity.y = -0.3,
        WorldRule::PlayerSpeedClamp,
    );
    assert_invariant_violation(
        |world| {
            world.shots.push(Shot {
                position: Vec2::new(-0.1, 0.5),
                velocity: Vec2::new(1.0, 0.0),
            })
        },
        WorldRule::ShotBounds,
    );
    assert_invariant_violation(
        |world| {
            world.asteroids.pop();
        },
        WorldRule::AsteroidCount,
    );
    assert_invariant_violation(
        |world| world.asteroids[3].position.y = 2.0,
        WorldRule::AsteroidBounds,
    );
    assert_invariant_violation(
        |world| {
            world.stars.push(Star {
                position: Vec2::new(0.5, 0.5),
            })
        },
        WorldRule::StarCount,
    );
    assert_eq!(validate_shot_growth(3, 5), Err(WorldRule::ShotGrowth));
}

#[test]
fn hand_built_worlds_are_checked_by_invariants() {
    let generated = World::generate(11);
    let sparse = World::from_parts(
        World::spawn_player(),
        Vec::new(),
        generated.asteroids()[..1].to_vec(),
        generated.stars().to_vec(),
    );
    assert_eq!(sparse.validate_invariants(), Err(WorldRule::AsteroidCount));

    let full = World::from_parts(
        World::spawn_player(),
        Vec::new(),
        generated.asteroids().to_vec(),
        generated.stars().to_vec(),
    );
    assert_eq!(full.validate_invariants(), Ok(()));
}
