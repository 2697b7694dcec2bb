//! Bevy ECS Integration Tests
//!
//! These tests pin down the bevy_ecs behavior the scene registry relies on,
//! so breaking changes show up here first when upgrading bevy_ecs.
//!
//! # Test Categories
//!
//! 1. **World & Resources** - Resource insertion, retrieval, mutability
//! 2. **Entity & Component** - Spawning, despawning, component operations
//! 3. **Query Patterns** - Filtered queries over live objects
//!
//! # Usage
//!
//! ```sh
//! cargo test --test bevy_ecs_integration
//! ```

use bevy_ecs::prelude::*;

use scenekit2d::components::gameobject::{Live, ObjectId, ObjectState};
use scenekit2d::components::sortlayer::SortLayer;
use scenekit2d::components::transform::Transform;
use scenekit2d::resources::camera2d::Camera2D;
use scenekit2d::resources::worldtime::WorldTime;

fn spawn_object(world: &mut World, id: &str, seq: u64, layer: i32) -> Entity {
    world
        .spawn((
            ObjectId(id.to_owned()),
            ObjectState::new(seq),
            Transform::default(),
            SortLayer(layer),
        ))
        .id()
}

// =============================================================================
// World & Resources
// =============================================================================

#[test]
fn world_insert_resource() {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());

    let time = world.resource::<WorldTime>();
    assert_eq!(time.frame_count, 0);
    assert!((time.time_scale - 1.0).abs() < f32::EPSILON);
}

#[test]
fn world_resource_mut_persists() {
    let mut world = World::new();
    world.insert_resource(Camera2D::default());

    world.resource_mut::<Camera2D>().angle = 30.0;

    assert!((world.resource::<Camera2D>().angle - 30.0).abs() < f32::EPSILON);
}

#[test]
fn world_missing_resource_is_none() {
    let world = World::new();
    assert!(world.get_resource::<WorldTime>().is_none());
    assert!(!world.contains_resource::<Camera2D>());
}

// =============================================================================
// Entity & Component
// =============================================================================

#[test]
fn entity_spawn_and_get() {
    let mut world = World::new();
    let entity = spawn_object(&mut world, "a", 0, 2);

    assert_eq!(world.get::<ObjectId>(entity).unwrap().as_str(), "a");
    assert_eq!(world.get::<SortLayer>(entity).unwrap().0, 2);
}

#[test]
fn entity_get_mut_changes_component() {
    let mut world = World::new();
    let entity = spawn_object(&mut world, "a", 0, 0);

    world.get_mut::<Transform>(entity).unwrap().position.x = 12.0;

    assert!((world.get::<Transform>(entity).unwrap().position.x - 12.0).abs() < f32::EPSILON);
}

#[test]
fn entity_insert_and_remove_marker() {
    let mut world = World::new();
    let entity = spawn_object(&mut world, "a", 0, 0);
    assert!(world.get::<Live>(entity).is_none());

    world.entity_mut(entity).insert(Live);
    assert!(world.get::<Live>(entity).is_some());

    world.entity_mut(entity).remove::<Live>();
    assert!(world.get::<Live>(entity).is_none());
}

#[test]
fn entity_despawn_invalidates_lookups() {
    let mut world = World::new();
    let entity = spawn_object(&mut world, "a", 0, 0);

    assert!(world.despawn(entity));

    assert!(world.get::<ObjectId>(entity).is_none());
    assert!(world.get_entity(entity).is_err());
    assert!(!world.despawn(entity));
}

// =============================================================================
// Query Patterns
// =============================================================================

#[test]
fn query_filtered_sees_only_live_entities() {
    let mut world = World::new();
    let a = spawn_object(&mut world, "a", 0, 0);
    spawn_object(&mut world, "b", 1, 0);
    world.entity_mut(a).insert(Live);

    let mut query = world.query_filtered::<&ObjectId, With<Live>>();
    let ids: Vec<&str> = query.iter(&world).map(ObjectId::as_str).collect();

    assert_eq!(ids, vec!["a"]);
}

#[test]
fn query_results_sort_by_layer_then_sequence() {
    let mut world = World::new();
    for (id, seq, layer) in [("c", 2, 0), ("a", 0, 0), ("b", 1, -1)] {
        let entity = spawn_object(&mut world, id, seq, layer);
        world.entity_mut(entity).insert(Live);
    }

    let mut query = world.query_filtered::<(&ObjectId, &SortLayer, &ObjectState), With<Live>>();
    let mut rows: Vec<(i32, u64, String)> = query
        .iter(&world)
        .map(|(id, layer, state)| (layer.0, state.seq, id.as_str().to_owned()))
        .collect();
    rows.sort_by_key(|(layer, seq, _)| (*layer, *seq));

    let ids: Vec<&str> = rows.iter().map(|(_, _, id)| id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}
