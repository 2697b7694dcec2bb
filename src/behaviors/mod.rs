//! Pluggable behavior attached to game objects.
//!
//! Two traits carry game logic:
//! - [`GameComponent`] – a behavior unit owned by exactly one object; receives
//!   every lifecycle event including `draw`.
//! - [`ObjectBehavior`] – the object's own hooks (everything but `draw`).
//!
//! Both route a [`GameEvent`] to per-event hooks through an exhaustive
//! `match` in `on_event`; the hooks default to doing nothing, so an
//! implementation overrides only what it needs. Hooks return
//! [`Result`](crate::error::Result): a failing hook is logged by the
//! scheduler and the rest of the frame carries on.
//!
//! Built-in components:
//! - [`rectshape`] – filled rectangle placed by the owner's pivot
//! - [`sprite`] – image or sprite-sheet cell with frame animation
//! - [`animator`] – named animation clips switching a sibling sprite's image
//! - [`physics`] – kinematic velocity stub

pub mod animator;
pub mod physics;
pub mod rectshape;
pub mod sprite;

use std::any::Any;

use crate::context::Ctx;
use crate::error::Result;
use crate::events::lifecycle::GameEvent;
use crate::render::RenderSurface;

/// Upcast to [`Any`] for typed lookups on trait objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behavior unit bound to one game object.
pub trait GameComponent: AsAny + Send + Sync {
    /// Name used in logs and scene dumps.
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn on_init(&mut self, _ctx: &mut Ctx<'_>) -> Result<()> {
        Ok(())
    }
    fn on_start(&mut self, _ctx: &mut Ctx<'_>) -> Result<()> {
        Ok(())
    }
    fn on_update(&mut self, _ctx: &mut Ctx<'_>, _delta: f32) -> Result<()> {
        Ok(())
    }
    fn on_physics_update(&mut self, _ctx: &mut Ctx<'_>, _delta: f32) -> Result<()> {
        Ok(())
    }
    fn on_draw(&mut self, _ctx: &mut Ctx<'_>, _surface: &mut dyn RenderSurface) -> Result<()> {
        Ok(())
    }
    fn on_dispose(&mut self, _ctx: &mut Ctx<'_>) -> Result<()> {
        Ok(())
    }

    fn on_event(&mut self, ctx: &mut Ctx<'_>, event: GameEvent<'_>) -> Result<()> {
        match event {
            GameEvent::Init => self.on_init(ctx),
            GameEvent::Start => self.on_start(ctx),
            GameEvent::Update { delta } => self.on_update(ctx, delta),
            GameEvent::PhysicsUpdate { delta } => self.on_physics_update(ctx, delta),
            GameEvent::Draw { surface } => self.on_draw(ctx, surface),
            GameEvent::Dispose => self.on_dispose(ctx),
        }
    }
}

/// Hooks of the game object itself. Objects never draw and get no physics
/// tick; their components do.
pub trait ObjectBehavior: AsAny + Send + Sync {
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn on_init(&mut self, _ctx: &mut Ctx<'_>) -> Result<()> {
        Ok(())
    }
    fn on_start(&mut self, _ctx: &mut Ctx<'_>) -> Result<()> {
        Ok(())
    }
    fn on_update(&mut self, _ctx: &mut Ctx<'_>, _delta: f32) -> Result<()> {
        Ok(())
    }
    fn on_dispose(&mut self, _ctx: &mut Ctx<'_>) -> Result<()> {
        Ok(())
    }

    fn on_event(&mut self, ctx: &mut Ctx<'_>, event: GameEvent<'_>) -> Result<()> {
        match event {
            GameEvent::Init => self.on_init(ctx),
            GameEvent::Start => self.on_start(ctx),
            GameEvent::Update { delta } => self.on_update(ctx, delta),
            GameEvent::PhysicsUpdate { .. } | GameEvent::Draw { .. } => Ok(()),
            GameEvent::Dispose => self.on_dispose(ctx),
        }
    }
}

/// Object with no behavior of its own; a plain container for components.
#[derive(Debug, Default)]
pub struct EmptyObject;

impl ObjectBehavior for EmptyObject {}

/// Typed property bag of a component.
///
/// `apply` merges a patch: fields set in the patch overwrite, fields left as
/// `None` keep their current value.
pub trait Props: Default {
    type Patch: Default;

    fn apply(&mut self, patch: Self::Patch);
}

/// Components exposing a [`Props`] bag get `set_props` / `with_props`.
pub trait Configurable {
    type Props: Props;

    fn props(&self) -> &Self::Props;
    fn props_mut(&mut self) -> &mut Self::Props;

    /// Merge `patch` into the bag and return `self` for chaining.
    fn set_props(&mut self, patch: <Self::Props as Props>::Patch) -> &mut Self {
        self.props_mut().apply(patch);
        self
    }

    /// By-value [`set_props`](Self::set_props), for building a component
    /// before attaching it.
    fn with_props(mut self, patch: <Self::Props as Props>::Patch) -> Self
    where
        Self: Sized,
    {
        self.set_props(patch);
        self
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ObjectProps, Scene};

    #[derive(Default)]
    struct Ticks {
        updates: u32,
    }

    impl ObjectBehavior for Ticks {
        fn on_update(&mut self, _ctx: &mut Ctx<'_>, _delta: f32) -> Result<()> {
            self.updates += 1;
            Ok(())
        }
    }

    #[test]
    fn objects_ignore_physics_ticks() {
        let mut scene = Scene::new();
        let owner = scene.create_empty(ObjectProps::default(), Some("o")).unwrap();
        let mut ticks = Ticks::default();

        ticks
            .on_event(&mut Ctx::new(&mut scene, owner), GameEvent::PhysicsUpdate { delta: 1.0 })
            .unwrap();
        assert_eq!(ticks.updates, 0);

        ticks
            .on_event(&mut Ctx::new(&mut scene, owner), GameEvent::Update { delta: 1.0 })
            .unwrap();
        assert_eq!(ticks.updates, 1);
    }

    #[test]
    fn short_type_name_strips_path() {
        assert_eq!(short_type_name("a::b::Sprite"), "Sprite");
        assert_eq!(short_type_name("Sprite"), "Sprite");
    }

    #[test]
    fn default_names_use_the_concrete_type() {
        let empty: Box<dyn ObjectBehavior> = Box::new(EmptyObject);
        assert_eq!(empty.name(), "EmptyObject");
    }
}
