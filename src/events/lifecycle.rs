//! Lifecycle events delivered to game objects and their components.
//!
//! The scheduler builds one [`GameEvent`] per dispatch and hands it to
//! [`GameComponent::on_event`](crate::behaviors::GameComponent::on_event) or
//! [`ObjectBehavior::on_event`](crate::behaviors::ObjectBehavior::on_event),
//! which route it to the matching hook with an exhaustive `match`.

use crate::render::RenderSurface;

/// Event payloads, in lifecycle order.
pub enum GameEvent<'s> {
    /// Delivered once when an object is committed, or when a component is
    /// attached.
    Init,
    /// Delivered once, on the first scheduling pass that sees the receiver.
    Start,
    /// Delivered every frame after start. `delta` is elapsed seconds.
    Update { delta: f32 },
    /// Delivered to components right after `Update`.
    PhysicsUpdate { delta: f32 },
    /// Delivered to components inside a scoped render transform.
    Draw { surface: &'s mut dyn RenderSurface },
    /// Delivered once before removal. Terminal.
    Dispose,
}

impl GameEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Init => EventKind::Init,
            GameEvent::Start => EventKind::Start,
            GameEvent::Update { .. } => EventKind::Update,
            GameEvent::PhysicsUpdate { .. } => EventKind::PhysicsUpdate,
            GameEvent::Draw { .. } => EventKind::Draw,
            GameEvent::Dispose => EventKind::Dispose,
        }
    }
}

/// Payload-free tag of a [`GameEvent`], handy for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Init,
    Start,
    Update,
    PhysicsUpdate,
    Draw,
    Dispose,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::Init => "init",
            EventKind::Start => "start",
            EventKind::Update => "update",
            EventKind::PhysicsUpdate => "physics_update",
            EventKind::Draw => "draw",
            EventKind::Dispose => "dispose",
        };
        f.write_str(name)
    }
}
