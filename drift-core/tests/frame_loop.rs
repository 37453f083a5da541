use drift_core::collision::{is_collision, ship_triangle};
use drift_core::render::{DrawCommand, RecordingSurface};
use drift_core::sim::{Asteroid, Shot, Star};
use drift_core::{FrameStepper, LoopState, ManualScheduler, Vec2, Viewport, World};

fn asteroid_at(x: f64, y: f64) -> Asteroid {
    Asteroid {
        position: Vec2::new(x, y),
        velocity: Vec2::ZERO,
        spots: vec![Vec2::new(0.5, 0.5)],
    }
}

fn stars() -> Vec<Star> {
    vec![
        Star {
            position: Vec2::new(0.2, 0.3),
        },
        Star {
            position: Vec2::new(0.7, 0.1),
        },
    ]
}

#[test]
fn vertex_on_asteroid_center_flags_collision() {
    let (width, height) = (1280.0, 720.0);
    let viewport = Viewport::new(width, height);
    let center = viewport.to_surface(Vec2::new(0.5, 0.5));
    let vertex = Vec2::new(0.5 * width, 0.5 * height);
    assert!(is_collision(&[vertex], &[center], viewport.scale()));
}

#[test]
fn shot_leaving_the_field_is_gone_next_frame() {
    let shots = vec![Shot {
        position: Vec2::new(0.99, 0.5),
        velocity: Vec2::new(1.0, 0.0),
    }];
    let world = World::from_parts(
        World::spawn_player(),
        shots,
        vec![asteroid_at(0.1, 0.9)],
        stars(),
    );
    let mut stepper = FrameStepper::new(world, 10_000.0);
    let mut scheduler = ManualScheduler::new();
    let mut surface = RecordingSurface::new();
    let viewport = Viewport::new(1000.0, 500.0);

    stepper.start(&mut scheduler);
    assert!(scheduler.take_request());
    let report = stepper.tick(10_020.0, viewport, &mut surface, &mut scheduler);
    assert!((report.elapsed_s - 0.02).abs() < 1e-12);
    assert_eq!(report.shots_culled, 1);
    assert!(stepper.world().shots().is_empty());

    assert!(scheduler.take_request());
    let report = stepper.tick(10_036.0, viewport, &mut surface, &mut scheduler);
    assert_eq!(report.state, LoopState::Running);
    assert_eq!(report.shots_culled, 0);
    assert!(stepper.world().shots().is_empty());
}

#[test]
fn loop_runs_until_the_ship_drifts_into_an_asteroid() {
    // The ship starts at the centre drifting right at 0.01/s; a parked
    // asteroid sits just ahead of it.
    let world = World::from_parts(
        World::spawn_player(),
        Vec::new(),
        vec![asteroid_at(0.6, 0.5)],
        stars(),
    );
    let viewport = Viewport::new(800.0, 800.0);
    let mut stepper = FrameStepper::new(world, 0.0);
    let mut scheduler = ManualScheduler::new();
    let mut surface = RecordingSurface::new();

    stepper.start(&mut scheduler);
    let mut now = 0.0;
    let mut ticks = 0u32;
    while scheduler.take_request() {
        now += 1000.0 / 60.0;
        stepper.tick(now, viewport, &mut surface, &mut scheduler);
        ticks += 1;
        assert!(ticks < 60 * 20, "ship never reached the asteroid");
    }

    assert_eq!(stepper.state(), LoopState::Halted);
    let player = stepper.world().player();
    let scale = viewport.scale();
    let nose = ship_triangle(player, viewport)[0];
    let center = viewport.to_surface(Vec2::new(0.6, 0.5));
    assert!(nose.distance(center) < scale / 18.0);
    assert!(player.position.x < 0.6);
}

#[test]
fn resize_tracks_the_viewport_every_frame() {
    let world = World::from_parts(
        World::spawn_player(),
        Vec::new(),
        vec![asteroid_at(0.1, 0.1)],
        stars(),
    );
    let mut stepper = FrameStepper::new(world, 0.0);
    let mut scheduler = ManualScheduler::new();
    let mut surface = RecordingSurface::new();

    for (frame, viewport) in [
        Viewport::new(640.0, 480.0),
        Viewport::new(1920.0, 1080.0),
        Viewport::new(300.0, 900.0),
    ]
    .into_iter()
    .enumerate()
    {
        stepper.tick(
            (frame as f64 + 1.0) * 16.0,
            viewport,
            &mut surface,
            &mut scheduler,
        );
        assert_eq!(
            surface.commands()[0],
            DrawCommand::Resize {
                width: viewport.width,
                height: viewport.height
            }
        );
        let asteroid_radius = surface.commands().iter().find_map(|command| match command {
            DrawCommand::FillCircle { radius, .. } if *radius > viewport.scale() / 20.0 => {
                Some(*radius)
            }
            _ => None,
        });
        assert_eq!(asteroid_radius, Some(viewport.scale() / 18.0));
    }
}
