//! Local transform of a game object.
//!
//! When the object has a [`ParentObject`](super::hierarchy::ParentObject),
//! `position`, `angle` and `scale` are interpreted relative to the parent; the
//! composed result is computed on demand by
//! [`world_transform`](crate::systems::propagate_transforms::world_transform).

use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::math::{Matrix2D, Vector2};

#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform {
    /// Placement, relative to the parent when there is one.
    pub position: Vector2,
    /// Secondary offset reserved for local-space coordinates. Not composed
    /// into any matrix.
    pub local_offset: Vector2,
    /// Per-axis scale. Negative values flip.
    pub scale: Vector2,
    /// Normalized anchor applied to size-based drawing.
    pub pivot: Vector2,
    /// Rotation in degrees.
    pub angle: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            local_offset: Vector2::ZERO,
            scale: Vector2::ONE,
            pivot: Vector2::new(0.5, 0.5),
            angle: 0.0,
        }
    }
}

impl Transform {
    pub fn from_position(x: f32, y: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            ..Self::default()
        }
    }

    pub fn with_angle(mut self, degrees: f32) -> Self {
        self.angle = degrees;
        self
    }

    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = Vector2::new(sx, sy);
        self
    }

    pub fn with_pivot(mut self, px: f32, py: f32) -> Self {
        self.pivot = Vector2::new(px, py);
        self
    }

    /// Offset that places the pivot fraction of a `size`-sized rectangle at
    /// the object's origin: `pivot × (size × -1)`.
    pub fn pivot_offset(&self, size: Vector2) -> Vector2 {
        self.pivot.multiply_components(size.scale(-1.0))
    }

    /// Matrix of this transform alone, ignoring any parent.
    pub fn local_matrix(&self) -> Matrix2D {
        Matrix2D::compose(self.angle, self.position, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transform_values() {
        let t = Transform::default();
        assert_eq!(t.position, Vector2::ZERO);
        assert_eq!(t.local_offset, Vector2::ZERO);
        assert_eq!(t.scale, Vector2::ONE);
        assert_eq!(t.pivot, Vector2::new(0.5, 0.5));
        assert_eq!(t.angle, 0.0);
    }

    #[test]
    fn pivot_offset_centers_by_default() {
        let t = Transform::default();
        assert_eq!(t.pivot_offset(Vector2::new(30.0, 10.0)), Vector2::new(-15.0, -5.0));
    }

    #[test]
    fn pivot_offset_top_left_anchor_is_zero() {
        let t = Transform::default().with_pivot(0.0, 0.0);
        let offset = t.pivot_offset(Vector2::new(16.0, 16.0));
        assert_eq!(offset.x, 0.0);
        assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn local_matrix_uses_position_angle_scale() {
        let t = Transform::from_position(4.5, 8.0).with_scale(-1.0, 1.0);
        let m = t.local_matrix();
        assert_eq!(m.a, -1.0);
        assert_eq!(m.tx, 4.0);
        assert_eq!(m.ty, 8.0);
    }
}
