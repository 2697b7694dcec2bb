//! Integration tests for the parent-child object hierarchy and world
//! transform composition.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test hierarchy_integration
//! ```

use scenekit2d::components::transform::Transform;
use scenekit2d::render::recording::RecordingSurface;
use scenekit2d::scene::{ObjectHandle, ObjectProps, Scene};
use scenekit2d::systems::frame::run_frame;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn object(scene: &mut Scene, id: &str, transform: Transform) -> ObjectHandle {
    scene
        .create_empty(ObjectProps::default().with_transform(transform), Some(id))
        .unwrap()
}

fn tick(scene: &mut Scene) {
    let mut surface = RecordingSurface::new(320.0, 240.0);
    run_frame(scene, &mut surface, 1.0 / 60.0);
}

// =============================================================================
// World transform composition
// =============================================================================

#[test]
fn world_transform_of_a_root_mirrors_local() {
    let mut scene = Scene::new();
    let root = object(
        &mut scene,
        "root",
        Transform::from_position(100.0, 50.0)
            .with_angle(45.0)
            .with_scale(2.0, 3.0),
    );

    let gt = scene.world_transform(root).unwrap();
    assert!(approx_eq(gt.position.x, 100.0));
    assert!(approx_eq(gt.position.y, 50.0));
    assert!(approx_eq(gt.angle, 45.0));
    assert!(approx_eq(gt.scale.x, 2.0));
    assert!(approx_eq(gt.scale.y, 3.0));
}

#[test]
fn world_transform_sums_three_levels_without_rotation() {
    let mut scene = Scene::new();
    let a = object(&mut scene, "a", Transform::from_position(10.0, 0.0));
    let b = object(&mut scene, "b", Transform::from_position(5.0, 1.0));
    let c = object(&mut scene, "c", Transform::from_position(2.0, 1.0));
    scene.set_parent(b, a).unwrap();
    scene.set_parent(c, b).unwrap();

    let gt = scene.world_transform(c).unwrap();
    assert!(approx_eq(gt.position.x, 17.0));
    assert!(approx_eq(gt.position.y, 2.0));
    assert!(approx_eq(gt.angle, 0.0));
}

#[test]
fn rotated_parent_swings_child_offset() {
    let mut scene = Scene::new();
    let a = object(
        &mut scene,
        "a",
        Transform::from_position(10.0, 0.0).with_angle(90.0),
    );
    let b = object(&mut scene, "b", Transform::from_position(5.0, 0.0));
    scene.set_parent(b, a).unwrap();

    let gt = scene.world_transform(b).unwrap();
    assert!(approx_eq(gt.position.x, 10.0), "x was {}", gt.position.x);
    assert!(approx_eq(gt.position.y, 5.0), "y was {}", gt.position.y);
    assert!(approx_eq(gt.angle, 90.0));
}

#[test]
fn parent_scale_multiplies_child_offset_and_scale() {
    let mut scene = Scene::new();
    let a = object(
        &mut scene,
        "a",
        Transform::from_position(0.0, 0.0).with_scale(2.0, 2.0),
    );
    let b = object(
        &mut scene,
        "b",
        Transform::from_position(5.0, 0.0).with_scale(0.5, 3.0),
    );
    scene.set_parent(b, a).unwrap();

    let gt = scene.world_transform(b).unwrap();
    assert!(approx_eq(gt.position.x, 10.0));
    assert!(approx_eq(gt.scale.x, 1.0));
    assert!(approx_eq(gt.scale.y, 6.0));
}

#[test]
fn moving_the_parent_moves_the_child() {
    let mut scene = Scene::new();
    let a = object(&mut scene, "a", Transform::from_position(0.0, 0.0));
    let b = object(&mut scene, "b", Transform::from_position(1.0, 1.0));
    scene.set_parent(b, a).unwrap();

    scene.transform_mut(a).unwrap().position.x = 40.0;

    let gt = scene.world_transform(b).unwrap();
    assert!(approx_eq(gt.position.x, 41.0));
    assert!(approx_eq(gt.position.y, 1.0));
}

// =============================================================================
// Parent / child links
// =============================================================================

#[test]
fn set_parent_links_both_sides() {
    let mut scene = Scene::new();
    let a = object(&mut scene, "a", Transform::default());
    let b = object(&mut scene, "b", Transform::default());

    scene.set_parent(b, a).unwrap();

    assert_eq!(scene.parent(b), Some(a));
    assert_eq!(scene.children(a), vec![b]);
    assert!(scene.parent(a).is_none());
}

#[test]
fn reparenting_removes_child_from_old_parent() {
    let mut scene = Scene::new();
    let a = object(&mut scene, "a", Transform::default());
    let b = object(&mut scene, "b", Transform::default());
    let c = object(&mut scene, "c", Transform::default());

    scene.set_parent(c, a).unwrap();
    scene.set_parent(c, b).unwrap();

    assert_eq!(scene.parent(c), Some(b));
    assert!(scene.children(a).is_empty());
    assert_eq!(scene.children(b), vec![c]);
}

#[test]
fn set_children_adopts_every_child() {
    let mut scene = Scene::new();
    let a = object(&mut scene, "a", Transform::default());
    let b = object(&mut scene, "b", Transform::default());
    let c = object(&mut scene, "c", Transform::default());

    scene.set_children(a, &[b, c]).unwrap();

    assert_eq!(scene.children(a).len(), 2);
    assert_eq!(scene.parent(b), Some(a));
    assert_eq!(scene.parent(c), Some(a));
}

#[test]
fn clear_parent_makes_a_root_again() {
    let mut scene = Scene::new();
    let a = object(&mut scene, "a", Transform::from_position(10.0, 0.0));
    let b = object(&mut scene, "b", Transform::from_position(5.0, 0.0));
    scene.set_parent(b, a).unwrap();

    scene.clear_parent(b).unwrap();

    assert!(scene.parent(b).is_none());
    assert!(scene.children(a).is_empty());
    let gt = scene.world_transform(b).unwrap();
    assert!(approx_eq(gt.position.x, 5.0));
}

#[test]
fn destroying_a_parent_orphans_its_children() {
    let mut scene = Scene::new();
    let a = object(&mut scene, "a", Transform::from_position(10.0, 0.0));
    let b = object(&mut scene, "b", Transform::from_position(5.0, 0.0));
    scene.set_parent(b, a).unwrap();
    tick(&mut scene);

    scene.remove_object("a").unwrap();
    tick(&mut scene);

    assert!(scene.get_object("a").is_none());
    assert!(!scene.contains(a));
    assert_eq!(scene.get_object("b"), Some(b));
    assert!(scene.parent(b).is_none());
    let gt = scene.world_transform(b).unwrap();
    assert!(approx_eq(gt.position.x, 5.0));
}

#[test]
fn destroying_a_child_unlinks_it_from_its_parent() {
    let mut scene = Scene::new();
    let a = object(&mut scene, "a", Transform::default());
    let b = object(&mut scene, "b", Transform::default());
    scene.set_parent(b, a).unwrap();
    tick(&mut scene);

    scene.remove_object("b").unwrap();
    tick(&mut scene);

    assert!(scene.children(a).is_empty());
}
