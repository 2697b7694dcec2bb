//! Engine configuration.
//!
//! Settings for a session: surface size, image smoothing, pointer pixel
//! scale, frame rate and asset root. Defaults allow a safe startup; values
//! can be loaded from and saved to an INI file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 640
//! height = 360
//! smooth_image = false
//! pixel_scale = 2
//!
//! [window]
//! title = scenekit2d
//! target_fps = 60
//!
//! [assets]
//! root = resources/
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::{EngineError, Result};

/// Default safe values for startup
const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 360;
const DEFAULT_SMOOTH_IMAGE: bool = false;
const DEFAULT_PIXEL_SCALE: f32 = 1.0;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_TITLE: &str = "scenekit2d";
const DEFAULT_ASSET_ROOT: &str = "resources/";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Drawing surface width in pixels.
    pub width: u32,
    /// Drawing surface height in pixels.
    pub height: u32,
    /// Filter images bilinearly instead of nearest-neighbour.
    pub smooth_image: bool,
    /// Ratio between window pixels and surface pixels; pointer positions
    /// are divided by it.
    pub pixel_scale: f32,
    pub target_fps: u32,
    pub title: String,
    /// Directory that image paths are resolved against.
    pub asset_root: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            smooth_image: DEFAULT_SMOOTH_IMAGE,
            pixel_scale: DEFAULT_PIXEL_SCALE,
            target_fps: DEFAULT_TARGET_FPS,
            title: DEFAULT_TITLE.to_owned(),
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| EngineError::Config(format!("failed to load config file: {e}")))?;

        // [render] section
        if let Some(width) = config.getuint("render", "width").ok().flatten() {
            self.width = width as u32;
        }
        if let Some(height) = config.getuint("render", "height").ok().flatten() {
            self.height = height as u32;
        }
        if let Some(smooth) = config.getbool("render", "smooth_image").ok().flatten() {
            self.smooth_image = smooth;
        }
        if let Some(scale) = config.getfloat("render", "pixel_scale").ok().flatten() {
            if scale > 0.0 {
                self.pixel_scale = scale as f32;
            } else {
                log::warn!("ignoring non-positive pixel_scale {scale}");
            }
        }

        // [window] section
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.asset_root = PathBuf::from(root);
        }

        info!(
            "Loaded config: {}x{} surface, pixel_scale={}, smooth={}, fps={}, assets={:?}",
            self.width,
            self.height,
            self.pixel_scale,
            self.smooth_image,
            self.target_fps,
            self.asset_root
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();

        // [render] section
        config.set("render", "width", Some(self.width.to_string()));
        config.set("render", "height", Some(self.height.to_string()));
        config.set("render", "smooth_image", Some(self.smooth_image.to_string()));
        config.set("render", "pixel_scale", Some(self.pixel_scale.to_string()));

        // [window] section
        config.set("window", "title", Some(self.title.clone()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [assets] section
        config.set(
            "assets",
            "root",
            Some(self.asset_root.to_string_lossy().into_owned()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| EngineError::Config(format!("failed to save config file: {e}")))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Override the surface size, keeping any dimension that is `None`.
    pub fn set_size(&mut self, width: Option<u32>, height: Option<u32>) {
        if let Some(w) = width {
            self.width = w;
        }
        if let Some(h) = height {
            self.height = h;
        }
    }

    /// Seconds per frame at the target rate.
    pub fn frame_budget(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scenekit2d-{}-{name}", fastrand::u64(..)))
    }

    #[test]
    fn defaults_are_safe() {
        let c = EngineConfig::new();
        assert_eq!(c.width, 640);
        assert_eq!(c.height, 360);
        assert!(!c.smooth_image);
        assert_eq!(c.pixel_scale, 1.0);
        assert_eq!(c.target_fps, 60);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let mut c = EngineConfig::with_path(temp_path("missing.ini"));
        let err = c.load_from_file().unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
        assert_eq!(c.width, 640);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = temp_path("roundtrip.ini");
        let mut saved = EngineConfig::with_path(&path);
        saved.width = 320;
        saved.height = 200;
        saved.smooth_image = true;
        saved.pixel_scale = 3.0;
        saved.title = "demo".to_owned();
        saved.save_to_file().expect("save");

        let mut loaded = EngineConfig::with_path(&path);
        loaded.load_from_file().expect("load");
        assert_eq!(loaded, saved);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let path = temp_path("partial.ini");
        std::fs::write(&path, "[render]\nwidth = 800\n").expect("write");
        let mut c = EngineConfig::with_path(&path);
        c.load_from_file().expect("load");
        assert_eq!(c.width, 800);
        assert_eq!(c.height, 360);
        assert_eq!(c.asset_root, PathBuf::from("resources/"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn set_size_keeps_missing_dimension() {
        let mut c = EngineConfig::new();
        c.set_size(Some(1024), None);
        assert_eq!((c.width, c.height), (1024, 360));
    }
}
