use crate::behaviors::{Configurable, GameComponent, Props};
use crate::context::Ctx;
use crate::error::Result;
use crate::math::Vector2;
use crate::render::{Color, Rect, RenderSurface};

/// Filled rectangle centred on the owner's pivot.
#[derive(Debug, Default)]
pub struct RectShape {
    props: RectShapeProps,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectShapeProps {
    pub color: Color,
    pub size: Vector2,
}

impl Default for RectShapeProps {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: Vector2::new(100.0, 100.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RectShapePatch {
    pub color: Option<Color>,
    pub size: Option<Vector2>,
}

impl Props for RectShapeProps {
    type Patch = RectShapePatch;

    fn apply(&mut self, patch: RectShapePatch) {
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
    }
}

impl RectShape {
    pub fn new(color: Color, size: Vector2) -> Self {
        Self {
            props: RectShapeProps { color, size },
        }
    }
}

impl Configurable for RectShape {
    type Props = RectShapeProps;

    fn props(&self) -> &RectShapeProps {
        &self.props
    }

    fn props_mut(&mut self) -> &mut RectShapeProps {
        &mut self.props
    }
}

impl GameComponent for RectShape {
    fn on_draw(&mut self, ctx: &mut Ctx<'_>, surface: &mut dyn RenderSurface) -> Result<()> {
        let RectShapeProps { color, size } = self.props;
        let origin = ctx.transform().pivot_offset(size);
        surface.fill_rect(Rect::from_origin_size(origin, size), color);
        Ok(())
    }
}
