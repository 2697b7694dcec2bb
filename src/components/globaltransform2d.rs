//! World-space transform of a game object.
//!
//! Computed on demand by
//! [`world_transform`](crate::systems::propagate_transforms::world_transform)
//! from the object's [`Transform`](super::transform::Transform) and those of
//! its ancestors. For a root object it mirrors the local values.

use serde::Serialize;

use crate::math::{Matrix2D, Vector2};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GlobalTransform2D {
    /// World-space position.
    pub position: Vector2,
    /// World-space rotation in degrees.
    pub angle: f32,
    /// World-space scale.
    pub scale: Vector2,
    /// The object's own pivot; pivots do not compose.
    pub pivot: Vector2,
}

impl Default for GlobalTransform2D {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            angle: 0.0,
            scale: Vector2::ONE,
            pivot: Vector2::new(0.5, 0.5),
        }
    }
}

impl GlobalTransform2D {
    /// Matrix placing local drawing coordinates in the world.
    pub fn matrix(&self) -> Matrix2D {
        Matrix2D::compose(self.angle, self.position, self.scale)
    }

    /// Compose a child's local values under this transform.
    pub fn child(&self, position: Vector2, angle: f32, scale: Vector2, pivot: Vector2) -> Self {
        let offset = position.multiply_components(self.scale).rotate(self.angle);
        Self {
            position: self.position + offset,
            angle: self.angle + angle,
            scale: self.scale.multiply_components(scale),
            pivot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_offset_is_scaled_then_rotated() {
        let parent = GlobalTransform2D {
            position: Vector2::new(100.0, 100.0),
            angle: 90.0,
            scale: Vector2::new(2.0, 2.0),
            ..Default::default()
        };
        let child = parent.child(Vector2::new(10.0, 0.0), 15.0, Vector2::new(0.5, 1.0), Vector2::ZERO);
        assert!((child.position.x - 100.0).abs() < 1e-3);
        assert!((child.position.y - 120.0).abs() < 1e-3);
        assert_eq!(child.angle, 105.0);
        assert_eq!(child.scale, Vector2::new(1.0, 2.0));
        assert_eq!(child.pivot, Vector2::ZERO);
    }
}
