//! Image and sprite-sheet drawing.
//!
//! A [`Sprite`] draws either a whole image or one cell of a horizontal strip
//! (`atlas` is the cell size). The current cell is `floor(frame)`; `frame`
//! advances by `anim_fps × delta` while `playing`, wrapping around when
//! `looping` and stopping on the last cell otherwise.
//!
//! Images load asynchronously: until the handle is ready the sprite has no
//! cells and draws nothing.

use crate::behaviors::{Configurable, GameComponent, Props};
use crate::context::Ctx;
use crate::error::Result;
use crate::math::Vector2;
use crate::render::{Rect, RenderSurface};
use crate::resources::imagestore::{ImageHandle, ImageStore};

#[derive(Debug, Default)]
pub struct Sprite {
    props: SpriteProps,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteProps {
    pub image: Option<ImageHandle>,
    /// Cell size of a sprite sheet. `None` draws the whole image.
    pub atlas: Option<Vector2>,
    /// Cells per second.
    pub anim_fps: f32,
    pub looping: bool,
    pub playing: bool,
    pub frame: f32,
}

impl Default for SpriteProps {
    fn default() -> Self {
        Self {
            image: None,
            atlas: None,
            anim_fps: 18.0,
            looping: true,
            playing: true,
            frame: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SpritePatch {
    pub image: Option<ImageHandle>,
    pub atlas: Option<Vector2>,
    pub anim_fps: Option<f32>,
    pub looping: Option<bool>,
    pub playing: Option<bool>,
    pub frame: Option<f32>,
}

impl Props for SpriteProps {
    type Patch = SpritePatch;

    fn apply(&mut self, patch: SpritePatch) {
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        if let Some(atlas) = patch.atlas {
            self.atlas = Some(atlas);
        }
        if let Some(fps) = patch.anim_fps {
            self.anim_fps = fps;
        }
        if let Some(looping) = patch.looping {
            self.looping = looping;
        }
        if let Some(playing) = patch.playing {
            self.playing = playing;
        }
        if let Some(frame) = patch.frame {
            self.frame = frame;
        }
    }
}

impl Sprite {
    pub fn new(image: ImageHandle) -> Self {
        Self {
            props: SpriteProps {
                image: Some(image),
                ..Default::default()
            },
        }
    }

    /// Sheet of `cell`-sized frames laid out left to right.
    pub fn sheet(image: ImageHandle, cell: Vector2) -> Self {
        Self {
            props: SpriteProps {
                image: Some(image),
                atlas: Some(cell),
                ..Default::default()
            },
        }
    }

    /// Number of cells: 0 without a ready image, 1 without an atlas.
    pub fn atlas_length(&self, images: &ImageStore) -> usize {
        let Some(size) = self.props.image.and_then(|h| images.size(h)) else {
            return 0;
        };
        match self.props.atlas {
            Some(cell) if cell.x > 0.0 => (size.x / cell.x).floor() as usize,
            Some(_) => 0,
            None => 1,
        }
    }

    pub fn current_cell(&self) -> usize {
        self.props.frame.max(0.0).floor() as usize
    }

    pub fn is_last_frame(&self, images: &ImageStore) -> bool {
        let len = self.atlas_length(images);
        len > 0 && self.current_cell() == len - 1
    }

    /// Advance the frame counter over `len` cells.
    fn advance(&mut self, len: usize, delta: f32) {
        let SpriteProps {
            playing, looping, anim_fps, ..
        } = self.props;
        if !playing || len == 0 {
            return;
        }
        let last = (len - 1) as f32;
        if !looping && self.props.frame >= last {
            self.props.frame = last;
            return;
        }
        let next = self.props.frame + anim_fps * delta;
        self.props.frame = if looping {
            next.rem_euclid(len as f32)
        } else {
            next.min(last)
        };
    }
}

impl Configurable for Sprite {
    type Props = SpriteProps;

    fn props(&self) -> &SpriteProps {
        &self.props
    }

    fn props_mut(&mut self) -> &mut SpriteProps {
        &mut self.props
    }
}

impl GameComponent for Sprite {
    fn on_update(&mut self, ctx: &mut Ctx<'_>, delta: f32) -> Result<()> {
        let len = self.atlas_length(ctx.images());
        self.advance(len, delta);
        Ok(())
    }

    fn on_draw(&mut self, ctx: &mut Ctx<'_>, surface: &mut dyn RenderSurface) -> Result<()> {
        let Some(image) = self.props.image else {
            return Ok(());
        };
        let Some(size) = ctx.images().size(image) else {
            return Ok(());
        };
        let origin = |cell: Vector2| ctx.transform().pivot_offset(cell).floor();

        match self.props.atlas {
            Some(cell) => {
                let len = self.atlas_length(ctx.images());
                if len == 0 {
                    return Ok(());
                }
                let sx = cell.x * (self.current_cell() % len) as f32;
                surface.draw_image(
                    image,
                    Rect::new(sx, 0.0, cell.x, cell.y),
                    Rect::from_origin_size(origin(cell), cell),
                );
            }
            None => {
                surface.draw_image(
                    image,
                    Rect::new(0.0, 0.0, size.x, size.y),
                    Rect::from_origin_size(origin(size), size),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(width: u32, height: u32) -> (ImageStore, ImageHandle) {
        let mut store = ImageStore::new("");
        let h = store.load("sheet.png");
        store.mark_ready(h, width, height);
        (store, h)
    }

    #[test]
    fn atlas_length_depends_on_readiness_and_atlas() {
        let mut store = ImageStore::new("");
        let h = store.load("sheet.png");
        let sprite = Sprite::sheet(h, Vector2::new(16.0, 16.0));
        assert_eq!(sprite.atlas_length(&store), 0);
        store.mark_ready(h, 64, 16);
        assert_eq!(sprite.atlas_length(&store), 4);
        assert_eq!(Sprite::new(h).atlas_length(&store), 1);
    }

    #[test]
    fn looping_sprite_wraps() {
        let (store, h) = store_with(64, 16);
        let mut sprite = Sprite::sheet(h, Vector2::new(16.0, 16.0));
        let len = sprite.atlas_length(&store);
        sprite.props_mut().anim_fps = 10.0;
        sprite.advance(len, 0.35);
        assert_eq!(sprite.current_cell(), 3);
        assert!(sprite.is_last_frame(&store));
        sprite.advance(len, 0.1);
        assert_eq!(sprite.current_cell(), 0);
    }

    #[test]
    fn one_shot_sprite_stops_on_last_cell() {
        let (store, h) = store_with(48, 16);
        let mut sprite = Sprite::sheet(h, Vector2::new(16.0, 16.0)).with_props(SpritePatch {
            looping: Some(false),
            ..Default::default()
        });
        let len = sprite.atlas_length(&store);
        for _ in 0..10 {
            sprite.advance(len, 0.1);
        }
        assert_eq!(sprite.current_cell(), 2);
        assert!(sprite.is_last_frame(&store));
    }

    #[test]
    fn paused_sprite_holds_its_frame() {
        let (store, h) = store_with(48, 16);
        let mut sprite = Sprite::sheet(h, Vector2::new(16.0, 16.0));
        sprite.set_props(SpritePatch {
            playing: Some(false),
            frame: Some(1.0),
            ..Default::default()
        });
        sprite.advance(sprite.atlas_length(&store), 1.0);
        assert_eq!(sprite.current_cell(), 1);
    }
}
