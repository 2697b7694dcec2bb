//! In-memory render surface.
//!
//! [`RecordingSurface`] keeps its own transform stack and appends a
//! [`DrawCommand`] for every call, tagging drawing primitives with the matrix
//! that was current when they were issued. Integration tests use it to assert
//! draw order and placement; the headless host uses it as a null backend.

use crate::math::{Matrix2D, Vector2};
use crate::render::{Color, Rect, RenderSurface};
use crate::resources::imagestore::ImageHandle;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Save,
    Restore,
    Translate(Vector2),
    Rotate(f32),
    SetTransform(Matrix2D),
    FillRect {
        rect: Rect,
        color: Color,
        transform: Matrix2D,
    },
    DrawImage {
        image: ImageHandle,
        src: Rect,
        dst: Rect,
        transform: Matrix2D,
    },
}

#[derive(Debug)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    current: Matrix2D,
    stack: Vec<Matrix2D>,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            current: Matrix2D::IDENTITY,
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Matrix currently applied to drawing calls.
    pub fn current_transform(&self) -> Matrix2D {
        self.current
    }

    /// Depth of the save stack. Zero between frames when every scope closed.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Filled rectangles in issue order.
    pub fn fills(&self) -> impl Iterator<Item = (&Rect, &Color, &Matrix2D)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect {
                rect,
                color,
                transform,
            } => Some((rect, color, transform)),
            _ => None,
        })
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> Vector2 {
        Vector2::new(self.width, self.height)
    }

    fn clear(&mut self, region: Rect) {
        self.commands.push(DrawCommand::Clear(region));
    }

    fn save(&mut self) {
        self.stack.push(self.current);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(matrix) = self.stack.pop() {
            self.current = matrix;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vector2) {
        self.current = self.current * Matrix2D::translation(offset);
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, degrees: f32) {
        self.current = self.current * Matrix2D::rotation(degrees);
        self.commands.push(DrawCommand::Rotate(degrees));
    }

    fn set_transform(&mut self, matrix: Matrix2D) {
        self.current = matrix;
        self.commands.push(DrawCommand::SetTransform(matrix));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color,
            transform: self.current,
        });
    }

    fn draw_image(&mut self, image: ImageHandle, src: Rect, dst: Rect) {
        self.commands.push(DrawCommand::DrawImage {
            image,
            src,
            dst,
            transform: self.current,
        });
    }
}
