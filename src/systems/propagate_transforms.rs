//! Transform composition through the parent chain.
//!
//! Nothing is cached: every call walks from the object up to its root and
//! folds the local transforms back down, so a parent moved earlier in the
//! same frame is always seen at its new place.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::hierarchy::ParentObject;
use crate::components::transform::Transform;

/// Deepest parent chain followed before giving up on a cycle.
const MAX_DEPTH: usize = 256;

/// World transform of `entity`, or `None` when it has no [`Transform`].
///
/// Ancestors that no longer exist end the chain; the object is then treated
/// as a root.
pub fn world_transform(world: &World, entity: Entity) -> Option<GlobalTransform2D> {
    let own = world.get::<Transform>(entity)?;

    let mut chain: Vec<&Transform> = vec![own];
    let mut cursor = world.get::<ParentObject>(entity).map(|p| p.0);
    while let Some(parent) = cursor {
        if chain.len() > MAX_DEPTH {
            warn!("parent chain of {entity:?} exceeds {MAX_DEPTH} levels, cutting it short");
            break;
        }
        let Some(transform) = world.get::<Transform>(parent) else {
            break;
        };
        chain.push(transform);
        cursor = world.get::<ParentObject>(parent).map(|p| p.0);
    }

    let mut ancestors = chain.into_iter().rev();
    let root = ancestors.next()?;
    let mut global = GlobalTransform2D {
        position: root.position,
        angle: root.angle,
        scale: root.scale,
        pivot: root.pivot,
    };
    for local in ancestors {
        global = global.child(local.position, local.angle, local.scale, local.pivot);
    }
    Some(global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    #[test]
    fn root_mirrors_local_values() {
        let mut world = World::new();
        let e = world
            .spawn(Transform::from_position(5.0, 6.0).with_angle(30.0))
            .id();
        let gt = world_transform(&world, e).expect("transform");
        assert_eq!(gt.position, Vector2::new(5.0, 6.0));
        assert_eq!(gt.angle, 30.0);
    }

    #[test]
    fn grandchild_composes_through_both_ancestors() {
        let mut world = World::new();
        let root = world.spawn(Transform::from_position(10.0, 0.0)).id();
        let mid = world
            .spawn((Transform::from_position(5.0, 0.0).with_scale(2.0, 2.0), ParentObject(root)))
            .id();
        let leaf = world
            .spawn((Transform::from_position(1.0, 1.0), ParentObject(mid)))
            .id();
        let gt = world_transform(&world, leaf).expect("transform");
        assert_eq!(gt.position, Vector2::new(17.0, 2.0));
        assert_eq!(gt.scale, Vector2::new(2.0, 2.0));
    }

    #[test]
    fn missing_parent_ends_chain() {
        let mut world = World::new();
        let gone = world.spawn(Transform::from_position(50.0, 50.0)).id();
        let child = world
            .spawn((Transform::from_position(1.0, 2.0), ParentObject(gone)))
            .id();
        world.despawn(gone);
        let gt = world_transform(&world, child).expect("transform");
        assert_eq!(gt.position, Vector2::new(1.0, 2.0));
    }

    #[test]
    fn cycle_does_not_hang() {
        let mut world = World::new();
        let a = world.spawn(Transform::default()).id();
        let b = world.spawn((Transform::default(), ParentObject(a))).id();
        world.entity_mut(a).insert(ParentObject(b));
        assert!(world_transform(&world, a).is_some());
    }
}
