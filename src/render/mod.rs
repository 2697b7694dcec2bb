//! Drawing surface contract and backends.
//!
//! The scene never talks to a graphics API directly. It drives a
//! [`RenderSurface`], a small immediate-mode canvas: a transform stack
//! (`save`/`restore`/`translate`/`rotate`/`set_transform`) plus two drawing
//! primitives.
//!
//! Submodules:
//! - [`recording`] – in-memory surface that records every call (tests, headless runs)
//! - `raylib_backend` – raylib-backed surface (feature `raylib`)

pub mod recording;
#[cfg(feature = "raylib")]
pub mod raylib_backend;

use serde::Serialize;

use crate::math::{Matrix2D, Vector2};
use crate::resources::imagestore::ImageHandle;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_origin_size(origin: Vector2, size: Vector2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }
}

/// RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#')?;
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Immediate-mode 2D drawing surface.
///
/// Transform calls post-multiply the current matrix, canvas style:
/// `translate` then `rotate` rotates around the translated origin.
///
/// The scheduler only uses `save`, `set_transform` and `restore`: it composes
/// the camera and world matrices on the CPU and loads the result through
/// [`SurfaceScope`]. `translate` and `rotate` are for drawing hooks that
/// place parts relative to their owner.
pub trait RenderSurface {
    /// Surface dimensions in pixels.
    fn size(&self) -> Vector2;
    fn clear(&mut self, region: Rect);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vector2);
    /// Rotate by `degrees`.
    fn rotate(&mut self, degrees: f32);
    /// Replace the current matrix.
    fn set_transform(&mut self, matrix: Matrix2D);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw the `src` region of `image` into `dst`. Unready images draw
    /// nothing.
    fn draw_image(&mut self, image: ImageHandle, src: Rect, dst: Rect);
}

/// Scoped render-transform context.
///
/// Saves the surface state on creation and restores it on drop, so the
/// restore also runs when the drawing code bails out early with an error.
pub struct SurfaceScope<'s> {
    surface: &'s mut dyn RenderSurface,
}

impl<'s> SurfaceScope<'s> {
    /// Save the surface and load `matrix` as the current transform.
    pub fn new(surface: &'s mut dyn RenderSurface, matrix: Matrix2D) -> Self {
        surface.save();
        surface.set_transform(matrix);
        Self { surface }
    }

    pub fn surface(&mut self) -> &mut dyn RenderSurface {
        &mut *self.surface
    }
}

impl Drop for SurfaceScope<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_saves_loads_the_matrix_and_restores() {
        use crate::render::recording::{DrawCommand, RecordingSurface};

        let mut surface = RecordingSurface::new(100.0, 100.0);
        let matrix = Matrix2D::translation(Vector2::new(10.0, 5.0));
        {
            let mut scope = SurfaceScope::new(&mut surface, matrix);
            scope.surface().translate(Vector2::new(1.0, 0.0));
        }
        assert_eq!(
            surface.take_commands(),
            vec![
                DrawCommand::Save,
                DrawCommand::SetTransform(matrix),
                DrawCommand::Translate(Vector2::new(1.0, 0.0)),
                DrawCommand::Restore,
            ]
        );
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.current_transform(), Matrix2D::IDENTITY);
    }

    #[test]
    fn color_from_hex() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("#00000080"), Some(Color::rgba(0, 0, 0, 128)));
        assert_eq!(Color::from_hex("ff0000"), None);
        assert_eq!(Color::from_hex("#ff00"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }
}
