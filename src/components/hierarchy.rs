//! Parent/child links between game objects.
//!
//! Both sides are plain entity handles: a parent never keeps a child alive
//! and a child never keeps its parent alive. The two components are only
//! changed together, by [`Scene::set_parent`](crate::scene::Scene::set_parent)
//! and [`Scene::clear_parent`](crate::scene::Scene::clear_parent).

use bevy_ecs::entity::Entity;
use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

/// Back-reference to the parent object.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParentObject(pub Entity);

/// Children of an object, in the order they were attached.
#[derive(Component, Clone, Debug, Default)]
pub struct ChildObjects(pub SmallVec<[Entity; 4]>);

impl ChildObjects {
    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains(&entity)
    }

    /// Add `entity` unless already present.
    pub fn insert(&mut self, entity: Entity) {
        if !self.contains(entity) {
            self.0.push(entity);
        }
    }

    pub fn remove(&mut self, entity: Entity) {
        self.0.retain(|e| *e != entity);
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
