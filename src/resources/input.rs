//! Per-frame keyboard and pointer input resource.
//!
//! The host feeds raw events in (`key_down`, `key_up`, `pointer_moved`) and
//! game code reads the state back through the `is_*` queries. Key codes are
//! strings in the web `KeyboardEvent.code` form (`"KeyA"`, `"ArrowLeft"`,
//! `"Space"`), which keeps game code independent of the backend.
//!
//! The `just_pressed` / `just_released` edge sets live for one frame: the
//! scheduler calls [`InputState::flush_edge_state`] after object updates.
use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::math::Vector2;

#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pressed: FxHashSet<String>,
    just_pressed: FxHashSet<String>,
    just_released: FxHashSet<String>,
    pointer: Vector2,
    /// Divisor applied to raw pointer coordinates.
    pub pixel_scale: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pressed: FxHashSet::default(),
            just_pressed: FxHashSet::default(),
            just_released: FxHashSet::default(),
            pointer: Vector2::ZERO,
            pixel_scale: 1.0,
        }
    }
}

impl InputState {
    pub fn with_pixel_scale(pixel_scale: f32) -> Self {
        Self {
            pixel_scale,
            ..Self::default()
        }
    }

    /// Register a key press. Auto-repeat while the key is held is ignored.
    pub fn key_down(&mut self, code: &str) {
        if self.pressed.contains(code) {
            return;
        }
        log::trace!("keydown: {code}");
        self.pressed.insert(code.to_owned());
        self.just_pressed.insert(code.to_owned());
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed.remove(code);
        self.just_released.insert(code.to_owned());
    }

    /// Store a raw pointer position, scaled down by `pixel_scale` and floored.
    pub fn pointer_moved(&mut self, raw: Vector2) {
        let scale = if self.pixel_scale > 0.0 {
            self.pixel_scale
        } else {
            1.0
        };
        self.pointer = Vector2::new((raw.x / scale).floor(), (raw.y / scale).floor());
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    pub fn is_just_pressed(&self, code: &str) -> bool {
        self.just_pressed.contains(code)
    }

    pub fn is_just_released(&self, code: &str) -> bool {
        self.just_released.contains(code)
    }

    pub fn pointer_position(&self) -> Vector2 {
        self.pointer
    }

    /// Horizontal/vertical axis from a negative and a positive key, in
    /// `{-1, 0, 1}`. The positive key wins when both are held.
    pub fn axis(&self, negative: &str, positive: &str) -> f32 {
        if self.is_pressed(positive) {
            1.0
        } else if self.is_pressed(negative) {
            -1.0
        } else {
            0.0
        }
    }

    /// Clear the one-frame edge sets.
    pub fn flush_edge_state(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
