//! Shared 2D camera resource.
//!
//! The camera is applied around every component draw call: the view is
//! centred on `pivot` (a fraction of the surface size), shifted by the
//! negated camera `position`, and finally rotated by `angle`.

use bevy_ecs::prelude::Resource;

use crate::math::{Matrix2D, Vector2};

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Camera2D {
    /// World point shown at the pivot.
    pub position: Vector2,
    /// Fraction of the surface size where `position` appears.
    pub pivot: Vector2,
    /// Rotation in degrees.
    pub angle: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            pivot: Vector2::new(0.5, 0.5),
            angle: 0.0,
        }
    }
}

impl Camera2D {
    /// Translate-to-pivot then translate-by-negative-position, both floored.
    pub fn view_matrix(&self, surface_size: Vector2) -> Matrix2D {
        let pivot_point = surface_size.multiply_components(self.pivot).floor();
        Matrix2D::translation(pivot_point) * Matrix2D::translation(-self.position.floor())
    }

    /// Full matrix for drawing an object whose world matrix is `world`.
    pub fn object_matrix(&self, surface_size: Vector2, world: Matrix2D) -> Matrix2D {
        self.view_matrix(surface_size) * world * Matrix2D::rotation(self.angle)
    }
}
