//! Storage for the [`GameComponent`]s attached to one game object.
//!
//! Each component lives in a [`ComponentSlot`] keyed by a
//! [`ComponentHandle`]. While a hook runs the component is moved out of its
//! slot (so the hook can borrow the scene mutably) and moved back afterwards;
//! a removal requested during that window is recorded in `removed` and
//! completed when the component comes back.

use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::behaviors::GameComponent;

/// Identity of one attached component instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentHandle(pub u64);

pub struct ComponentSlot {
    pub handle: ComponentHandle,
    pub started: bool,
    pub removed: bool,
    pub component: Option<Box<dyn GameComponent>>,
}

#[derive(Component, Default)]
pub struct AttachedComponents {
    pub slots: Vec<ComponentSlot>,
}

impl AttachedComponents {
    pub fn slot(&self, handle: ComponentHandle) -> Option<&ComponentSlot> {
        self.slots.iter().find(|s| s.handle == handle)
    }

    pub fn slot_mut(&mut self, handle: ComponentHandle) -> Option<&mut ComponentSlot> {
        self.slots.iter_mut().find(|s| s.handle == handle)
    }

    /// Handles of every component not pending removal, in insertion order.
    pub fn handles(&self) -> Vec<ComponentHandle> {
        self.slots
            .iter()
            .filter(|s| !s.removed)
            .map(|s| s.handle)
            .collect()
    }

    /// Components currently stored (not running a hook, not removed).
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (ComponentHandle, &(dyn GameComponent + 'static))> + '_ {
        self.slots.iter().filter(|s| !s.removed).filter_map(|s| {
            s.component
                .as_deref()
                .map(|component| (s.handle, component))
        })
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| !s.removed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
