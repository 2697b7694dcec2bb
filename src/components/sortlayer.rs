//! Sort layer component for update and draw ordering.
//!
//! Objects are visited in ascending [`SortLayer`] every frame, so higher
//! layers update later and draw on top of lower ones.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortLayer(pub i32);
