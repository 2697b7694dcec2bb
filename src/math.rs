//! 2D vector and affine matrix primitives.
//!
//! [`Vector2`] is a plain `Copy` pair used for positions, scales, pivots and
//! velocities. [`Matrix2D`] is a 2×3 affine matrix laid out as
//! `[a, b, c, d, tx, ty]`, mapping a point `(x, y)` to
//! `(a·x + c·y + tx, b·x + d·y + ty)`.
//!
//! Angles are in degrees everywhere in the public API.

use serde::Serialize;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Convert degrees to radians.
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Convert radians to degrees.
pub fn rad_to_deg(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Unclamped linear interpolation between two scalars.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    pub const ONE: Vector2 = Vector2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }

    /// Element-wise product.
    pub fn multiply_components(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x * other.x, self.y * other.y)
    }

    pub fn scale(self, factor: f32) -> Vector2 {
        Vector2::new(self.x * factor, self.y * factor)
    }

    /// Euclidean norm.
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or the zero vector when the
    /// magnitude is zero.
    pub fn normalize(self) -> Vector2 {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Vector2::ZERO;
        }
        self.scale(1.0 / magnitude)
    }

    /// Component-wise linear interpolation; `t` is not clamped.
    pub fn lerp(self, to: Vector2, t: f32) -> Vector2 {
        Vector2::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t))
    }

    /// Rotate by `degrees`. Positive angles turn +x towards +y (clockwise on a
    /// y-down screen).
    pub fn rotate(self, degrees: f32) -> Vector2 {
        let (sin, cos) = deg_to_rad(degrees).sin_cos();
        Vector2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn floor(self) -> Vector2 {
        Vector2::new(self.x.floor(), self.y.floor())
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::add(self, rhs)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        *self = *self + rhs;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::sub(self, rhs)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f32) -> Vector2 {
        self.scale(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

/// 2×3 affine matrix `[a, b, c, d, tx, ty]`.
///
/// `lhs * rhs` concatenates like a canvas `transform()` call: `rhs` is
/// applied to points first, then `lhs`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Matrix2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2D {
    pub const IDENTITY: Matrix2D = Matrix2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Build the matrix for a rotation (degrees), a position and a scale.
    ///
    /// The translation is floored so that sprites land on whole pixels.
    pub fn compose(angle: f32, position: Vector2, scale: Vector2) -> Matrix2D {
        let (sin, cos) = deg_to_rad(angle).sin_cos();
        Matrix2D {
            a: cos * scale.x,
            b: sin * scale.x,
            c: -sin * scale.y,
            d: cos * scale.y,
            tx: position.x.floor(),
            ty: position.y.floor(),
        }
    }

    pub fn translation(offset: Vector2) -> Matrix2D {
        Matrix2D {
            tx: offset.x,
            ty: offset.y,
            ..Self::IDENTITY
        }
    }

    pub fn rotation(degrees: f32) -> Matrix2D {
        Self::compose(degrees, Vector2::ZERO, Vector2::ONE)
    }

    pub fn to_array(self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
    }

    /// Map a point through the matrix.
    pub fn apply(&self, point: Vector2) -> Vector2 {
        Vector2::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` for a singular matrix (zero scale).
    pub fn inverse(&self) -> Option<Matrix2D> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        Some(Matrix2D {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            tx: (self.c * self.ty - self.d * self.tx) / det,
            ty: (self.b * self.tx - self.a * self.ty) / det,
        })
    }
}

impl Mul for Matrix2D {
    type Output = Matrix2D;
    fn mul(self, r: Matrix2D) -> Matrix2D {
        Matrix2D {
            a: self.a * r.a + self.c * r.b,
            b: self.b * r.a + self.d * r.b,
            c: self.a * r.c + self.c * r.d,
            d: self.b * r.c + self.d * r.d,
            tx: self.a * r.tx + self.c * r.ty + self.tx,
            ty: self.b * r.tx + self.d * r.ty + self.ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx(a: Vector2, b: Vector2) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    #[test]
    fn normalize_zero_vector_is_zero() {
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = Vector2::new(3.0, 4.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < EPSILON);
        assert!(approx(n, Vector2::new(0.6, 0.8)));
    }

    #[test]
    fn lerp_is_unclamped() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(10.0, -10.0);
        assert!(approx(a.lerp(b, 0.5), Vector2::new(5.0, -5.0)));
        assert!(approx(a.lerp(b, 2.0), Vector2::new(20.0, -20.0)));
    }

    #[test]
    fn rotate_preserves_magnitude() {
        let v = Vector2::new(3.0, 4.0);
        for angle in [0.0, 33.0, 90.0, 217.5, -45.0] {
            assert!((v.rotate(angle).magnitude() - 5.0).abs() < EPSILON);
        }
        assert!(approx(Vector2::new(1.0, 0.0).rotate(90.0), Vector2::new(0.0, 1.0)));
    }

    #[test]
    fn degree_radian_conversions() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < EPSILON);
        assert!((rad_to_deg(std::f32::consts::FRAC_PI_2) - 90.0).abs() < EPSILON);
    }

    #[test]
    fn compose_floors_translation() {
        let m = Matrix2D::compose(0.0, Vector2::new(10.7, -3.2), Vector2::ONE);
        assert_eq!(m.tx, 10.0);
        assert_eq!(m.ty, -4.0);
    }

    #[test]
    fn compose_layout_matches_canvas_order() {
        let m = Matrix2D::compose(90.0, Vector2::ZERO, Vector2::new(2.0, 3.0));
        let [a, b, c, d, _, _] = m.to_array();
        assert!(a.abs() < EPSILON);
        assert!((b - 2.0).abs() < EPSILON);
        assert!((c + 3.0).abs() < EPSILON);
        assert!(d.abs() < EPSILON);
    }

    #[test]
    fn compose_then_inverse_round_trips() {
        let point = Vector2::new(7.0, -3.0);
        for angle in [0.0, 45.0, 90.0, 180.0] {
            for scale in [
                Vector2::new(1.0, 1.0),
                Vector2::new(-1.0, 1.0),
                Vector2::new(2.0, 0.5),
            ] {
                let m = Matrix2D::compose(angle, Vector2::new(12.0, 5.0), scale);
                let inv = m.inverse().expect("non-singular");
                let back = inv.apply(m.apply(point));
                assert!(approx(back, point), "angle {angle} scale {scale:?} gave {back:?}");
            }
        }
    }

    #[test]
    fn zero_scale_has_no_inverse() {
        let m = Matrix2D::compose(0.0, Vector2::ZERO, Vector2::new(0.0, 1.0));
        assert!(m.inverse().is_none());
    }

    #[test]
    fn multiplication_applies_right_hand_side_first() {
        let t = Matrix2D::translation(Vector2::new(10.0, 0.0));
        let r = Matrix2D::rotation(90.0);
        // rotate, then translate
        assert!(approx((t * r).apply(Vector2::new(1.0, 0.0)), Vector2::new(10.0, 1.0)));
        // translate, then rotate
        assert!(approx((r * t).apply(Vector2::new(1.0, 0.0)), Vector2::new(0.0, 11.0)));
    }
}
