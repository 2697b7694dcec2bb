use crate::behaviors::{Configurable, GameComponent, Props};
use crate::context::Ctx;
use crate::error::Result;
use crate::math::Vector2;

/// Kinematic body: moves its owner by `velocity` (pixels per second) during
/// `physics_update`. No forces, no collisions.
#[derive(Debug, Default)]
pub struct Physics {
    props: PhysicsProps,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhysicsProps {
    pub velocity: Vector2,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PhysicsPatch {
    pub velocity: Option<Vector2>,
}

impl Props for PhysicsProps {
    type Patch = PhysicsPatch;

    fn apply(&mut self, patch: PhysicsPatch) {
        if let Some(velocity) = patch.velocity {
            self.velocity = velocity;
        }
    }
}

impl Physics {
    pub fn with_velocity(velocity: Vector2) -> Self {
        Self {
            props: PhysicsProps { velocity },
        }
    }

    pub fn velocity(&self) -> Vector2 {
        self.props.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.props.velocity = velocity;
    }
}

impl Configurable for Physics {
    type Props = PhysicsProps;

    fn props(&self) -> &PhysicsProps {
        &self.props
    }

    fn props_mut(&mut self) -> &mut PhysicsProps {
        &mut self.props
    }
}

impl GameComponent for Physics {
    fn on_physics_update(&mut self, ctx: &mut Ctx<'_>, delta: f32) -> Result<()> {
        let step = self.props.velocity * delta;
        if let Some(transform) = ctx.transform_mut() {
            transform.position += step;
        }
        Ok(())
    }
}
