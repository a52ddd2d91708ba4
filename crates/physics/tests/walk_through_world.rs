//! Controller behaviour against real parry3d-backed geometry.

use glam::Vec3;
use walkabout_physics::{
    CharacterController, CollisionWorld, GroundState, InputIntent, MoveKeys, ViewAngles,
};

const FRAME: f32 = 1.0 / 60.0;

fn floor(world: &mut CollisionWorld, half_size: f32) {
    world.add_box(
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(half_size, 0.5, half_size),
    );
}

fn hold_forward() -> MoveKeys {
    MoveKeys {
        forward: true,
        ..Default::default()
    }
}

fn run(
    controller: &mut CharacterController,
    world: &CollisionWorld,
    keys: MoveKeys,
    frames: usize,
) {
    let mut keys = keys;
    for _ in 0..frames {
        controller.tick(world, &mut keys, FRAME);
    }
}

#[test]
fn standing_still_settles_on_the_floor() {
    let mut world = CollisionWorld::new();
    floor(&mut world, 20.0);
    let mut controller = CharacterController::with_default_config();

    run(&mut controller, &world, MoveKeys::default(), 60);

    let pose = controller.pose();
    assert!((pose.head.y - 1.6).abs() < 0.01, "head={:?}", pose.head);
    assert!(pose.head.x.abs() < 1e-3 && pose.head.z.abs() < 1e-3);
    assert_eq!(controller.ground(), GroundState::Grounded);
}

#[test]
fn wall_blocks_walking() {
    let mut world = CollisionWorld::new();
    floor(&mut world, 20.0);
    // Wall with its near face at z = -3
    world.add_box(Vec3::new(0.0, 1.5, -3.5), Vec3::new(5.0, 1.5, 0.5));

    let mut controller = CharacterController::with_default_config();
    run(&mut controller, &world, hold_forward(), 120);

    let capsule = controller.capsule();
    let front = capsule.start.z - capsule.radius;
    assert!(
        front > -3.0 - 0.01,
        "capsule passed into the wall, front={front}"
    );
    assert!(
        front < -2.9,
        "capsule should be pressed against the wall, front={front}"
    );
    assert!((controller.pose().head.y - 1.6).abs() < 0.05);
}

#[test]
fn ramp_lifts_the_avatar() {
    let mut world = CollisionWorld::new();
    floor(&mut world, 40.0);
    world
        .add_convex_hull(&[
            Vec3::new(-3.0, 0.0, -2.0),
            Vec3::new(3.0, 0.0, -2.0),
            Vec3::new(-3.0, 0.0, -22.0),
            Vec3::new(3.0, 0.0, -22.0),
            Vec3::new(-3.0, 5.0, -22.0),
            Vec3::new(3.0, 5.0, -22.0),
        ])
        .expect("ramp hull");

    let mut controller = CharacterController::with_default_config();
    run(&mut controller, &world, hold_forward(), 120);

    let head = controller.pose().head;
    assert!(head.z < -5.0, "should be on the ramp, head={head:?}");
    assert!(head.y > 2.5, "should have climbed, head={head:?}");
}

#[test]
fn walking_off_the_edge_respawns() {
    let mut world = CollisionWorld::new();
    floor(&mut world, 2.0);

    let mut controller = CharacterController::with_default_config();
    run(&mut controller, &world, hold_forward(), 180);

    assert!(
        controller.recoveries() >= 1,
        "should have fallen out of bounds"
    );
    assert!(controller.pose().head.y > -25.0);
}

#[test]
fn turning_changes_heading() {
    let mut world = CollisionWorld::new();
    floor(&mut world, 20.0);

    let mut controller = CharacterController::with_default_config();
    // Turn to face +X
    controller.set_view(ViewAngles::new(0.0, -std::f32::consts::FRAC_PI_2));
    run(&mut controller, &world, hold_forward(), 60);

    let head = controller.pose().head;
    assert!(head.x > 2.0, "should walk toward +X, head={head:?}");
    assert!(head.z.abs() < 0.01);
}

#[test]
fn snapshot_input_ignores_view() {
    let mut world = CollisionWorld::new();
    floor(&mut world, 20.0);

    let mut controller = CharacterController::with_default_config();
    let mut intent = InputIntent::new(hold_forward(), Vec3::X);
    for _ in 0..60 {
        controller.tick(&world, &mut intent, FRAME);
    }

    assert!(controller.pose().head.x > 2.0);
    assert_eq!(controller.view(), ViewAngles::default());
}
