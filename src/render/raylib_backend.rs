//! Raylib window host and render surface.
//!
//! [`RaylibSurface`] keeps the current matrix on the CPU and hands it to
//! rlgl around every primitive, so raylib's batching sees already
//! transformed vertices. The window is `pixel_scale` times the surface size;
//! that scale is folded into every matrix.

use log::info;
use raylib::ffi;
use raylib::prelude::{RaylibDraw, RaylibHandle, RaylibThread, Rectangle};

use crate::math::{Matrix2D, Vector2};
use crate::render::{Color, Rect, RenderSurface};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::imagestore::ImageHandle;
use crate::resources::texturestore::TextureStore;
use crate::scene::Scene;
use crate::systems::frame::run_frame;
use crate::systems::frameloop::FrameHost;
use crate::systems::input::poll_raylib_input;

fn to_raylib_color(color: Color) -> raylib::color::Color {
    raylib::color::Color::new(color.r, color.g, color.b, color.a)
}

fn to_rectangle(rect: Rect) -> Rectangle {
    Rectangle::new(rect.x, rect.y, rect.w, rect.h)
}

/// Column-major 4×4 form of a 2D affine matrix, as rlgl expects.
fn to_gl(m: Matrix2D) -> [f32; 16] {
    [
        m.a, m.b, 0.0, 0.0, //
        m.c, m.d, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        m.tx, m.ty, 0.0, 1.0,
    ]
}

pub struct RaylibSurface<'a, D: RaylibDraw> {
    d: &'a mut D,
    textures: &'a TextureStore,
    size: Vector2,
    base: Matrix2D,
    current: Matrix2D,
    stack: Vec<Matrix2D>,
}

impl<'a, D: RaylibDraw> RaylibSurface<'a, D> {
    pub fn new(d: &'a mut D, textures: &'a TextureStore, size: Vector2, pixel_scale: f32) -> Self {
        Self {
            d,
            textures,
            size,
            base: Matrix2D::compose(0.0, Vector2::ZERO, Vector2::new(pixel_scale, pixel_scale)),
            current: Matrix2D::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// Run `draw` with the current matrix loaded into rlgl.
    fn with_matrix(&mut self, draw: impl FnOnce(&mut D)) {
        let gl = to_gl(self.base * self.current);
        // SAFETY: called between BeginDrawing/EndDrawing on the window thread;
        // push and pop are balanced and `gl` outlives the call.
        unsafe {
            ffi::rlPushMatrix();
            ffi::rlMultMatrixf(gl.as_ptr());
        }
        draw(&mut *self.d);
        unsafe {
            ffi::rlPopMatrix();
        }
    }
}

impl<D: RaylibDraw> RenderSurface for RaylibSurface<'_, D> {
    fn size(&self) -> Vector2 {
        self.size
    }

    fn clear(&mut self, region: Rect) {
        if region.x <= 0.0 && region.y <= 0.0 && region.w >= self.size.x && region.h >= self.size.y {
            self.d.clear_background(raylib::color::Color::WHITE);
        } else {
            self.with_matrix(|d| d.draw_rectangle_rec(to_rectangle(region), raylib::color::Color::WHITE));
        }
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(previous) = self.stack.pop() {
            self.current = previous;
        }
    }

    fn translate(&mut self, offset: Vector2) {
        self.current = self.current * Matrix2D::translation(offset);
    }

    fn rotate(&mut self, degrees: f32) {
        self.current = self.current * Matrix2D::rotation(degrees);
    }

    fn set_transform(&mut self, matrix: Matrix2D) {
        self.current = matrix;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let color = to_raylib_color(color);
        self.with_matrix(|d| d.draw_rectangle_rec(to_rectangle(rect), color));
    }

    fn draw_image(&mut self, image: ImageHandle, src: Rect, dst: Rect) {
        let textures = self.textures;
        let Some(texture) = textures.get(image) else {
            return;
        };
        self.with_matrix(|d| {
            d.draw_texture_pro(
                texture,
                to_rectangle(src),
                to_rectangle(dst),
                raylib::math::Vector2::new(0.0, 0.0),
                0.0,
                raylib::color::Color::WHITE,
            )
        });
    }
}

/// Windowed host. Frames are paced by raylib's target FPS.
pub struct RaylibHost {
    rl: RaylibHandle,
    thread: RaylibThread,
    textures: TextureStore,
    size: Vector2,
    pixel_scale: f32,
    smooth: bool,
}

impl RaylibHost {
    pub fn new(config: &EngineConfig) -> Self {
        let scale = config.pixel_scale;
        let (mut rl, thread) = raylib::init()
            .size(
                (config.width as f32 * scale) as i32,
                (config.height as f32 * scale) as i32,
            )
            .title(&config.title)
            .build();
        rl.set_target_fps(config.target_fps);
        info!("window open: {}x{} at scale {scale}", config.width, config.height);
        Self {
            rl,
            thread,
            textures: TextureStore::new(),
            size: Vector2::new(config.width as f32, config.height as f32),
            pixel_scale: scale,
            smooth: config.smooth_image,
        }
    }
}

impl FrameHost for RaylibHost {
    fn wait_for_frame(&mut self) -> bool {
        !self.rl.window_should_close()
    }

    fn frame(&mut self, scene: &mut Scene, delta: f32) {
        for image in scene.images_mut().drain_loaded() {
            match self
                .textures
                .upload(&mut self.rl, &self.thread, &image, self.smooth)
            {
                Some((w, h)) => scene.images_mut().mark_ready(image.handle, w, h),
                None => scene.images_mut().mark_failed(image.handle),
            }
        }
        poll_raylib_input(&self.rl, scene.input_mut());

        let mut d = self.rl.begin_drawing(&self.thread);
        let mut surface = RaylibSurface::new(&mut d, &self.textures, self.size, self.pixel_scale);
        run_frame(scene, &mut surface, delta);
    }
}
