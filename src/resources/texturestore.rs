//! GPU textures of loaded images, keyed by [`ImageHandle`].
//!
//! Owned by the raylib host; textures must stay on the thread that created
//! the window.

use log::warn;
use raylib::prelude::{Image, RaylibHandle, RaylibTexture2D, RaylibThread, Texture2D, TextureFilter};
use rustc_hash::FxHashMap;
use std::path::Path;

use crate::resources::imagestore::{ImageHandle, LoadedImage};

#[derive(Default)]
pub struct TextureStore {
    map: FxHashMap<ImageHandle, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: ImageHandle) -> Option<&Texture2D> {
        self.map.get(&handle)
    }

    /// Decode `image` and upload it. Returns the texture size on success.
    pub fn upload(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        image: &LoadedImage,
        smooth: bool,
    ) -> Option<(u32, u32)> {
        let extension = Path::new(&image.path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png");
        let decoded = match Image::load_image_from_mem(&format!(".{extension}"), &image.bytes) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("can't decode <{}>: {e}", image.path);
                return None;
            }
        };
        let mut texture = match rl.load_texture_from_image(thread, &decoded) {
            Ok(texture) => texture,
            Err(e) => {
                warn!("can't upload <{}>: {e}", image.path);
                return None;
            }
        };
        let filter = if smooth {
            TextureFilter::TEXTURE_FILTER_BILINEAR
        } else {
            TextureFilter::TEXTURE_FILTER_POINT
        };
        texture.set_texture_filter(thread, filter);
        let size = (texture.width as u32, texture.height as u32);
        self.map.insert(image.handle, texture);
        Some(size)
    }
}
