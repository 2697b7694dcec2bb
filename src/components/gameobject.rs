//! Identity and lifecycle data of a game object entity.
//!
//! Every game object is one ECS entity carrying at least [`ObjectId`],
//! [`ObjectState`], [`Transform`](super::transform::Transform),
//! [`SortLayer`](super::sortlayer::SortLayer),
//! [`ChildObjects`](super::hierarchy::ChildObjects),
//! [`AttachedComponents`](super::attached::AttachedComponents) and
//! [`ObjectLogic`]. The [`Live`] marker is added when the object is committed
//! into the registry.

use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::behaviors::ObjectBehavior;

/// Registry key of a game object.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle states of an object or a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Lifecycle {
    /// Created, waiting for the next commit.
    Pending,
    /// Committed and `init` delivered.
    Initialized,
    /// `start` delivered; receives updates from now on.
    Started,
    /// `dispose` delivered. Terminal.
    Disposed,
}

#[derive(Component, Clone, Copy, Debug)]
pub struct ObjectState {
    pub lifecycle: Lifecycle,
    pub active: bool,
    /// Creation sequence number, used to break sort-layer ties.
    pub seq: u64,
}

impl ObjectState {
    pub fn new(seq: u64) -> Self {
        Self {
            lifecycle: Lifecycle::Pending,
            active: true,
            seq,
        }
    }

    pub fn started(&self) -> bool {
        self.lifecycle == Lifecycle::Started
    }
}

/// Marker: the object is in the registry's live set.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Live;

/// The object's own hooks. Emptied while a hook is running.
#[derive(Component)]
pub struct ObjectLogic(pub Option<Box<dyn ObjectBehavior>>);

impl ObjectLogic {
    pub fn new(behavior: Box<dyn ObjectBehavior>) -> Self {
        Self(Some(behavior))
    }
}
