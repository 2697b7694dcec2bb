//! Frame loop driver.
//!
//! [`FrameLoop::run`] owns the loop: wait for the host's next frame (the
//! single suspension point), measure the elapsed time with [`FrameClock`],
//! update [`WorldTime`](crate::resources::worldtime::WorldTime), then let the
//! host run the frame on its surface. Hosts decide how frames are paced and
//! where they are drawn:
//!
//! - [`HeadlessHost`] – fixed number of frames on a [`RecordingSurface`]
//! - `RaylibHost` – window and vsync (feature `raylib`)

use log::{debug, info};
use std::time::Instant;

use crate::render::recording::RecordingSurface;
use crate::resources::imagestore::png_dimensions;
use crate::scene::Scene;
use crate::systems::frame::run_frame;
use crate::systems::time::update_world_time;

/// Measures real elapsed seconds between ticks.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// Longest delta handed to a frame. Stalls (debugger, window drag) are cut
    /// to this.
    pub const MAX_DELTA: f32 = 0.25;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Seconds since the previous tick; `0.0` on the first one.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = match self.last {
            Some(prev) => now
                .saturating_duration_since(prev)
                .as_secs_f32()
                .min(Self::MAX_DELTA),
            None => 0.0,
        };
        self.last = Some(now);
        delta
    }
}

/// Platform side of the loop.
pub trait FrameHost {
    /// Block until the next frame is due. `false` ends the loop.
    fn wait_for_frame(&mut self) -> bool;

    /// Run one frame. `delta` is already time-scaled.
    fn frame(&mut self, scene: &mut Scene, delta: f32);
}

#[derive(Debug, Default)]
pub struct FrameLoop {
    clock: FrameClock,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Drive `host` until it stops. Returns the number of frames run.
    pub fn run<H: FrameHost>(&mut self, scene: &mut Scene, host: &mut H) -> u64 {
        info!("frame loop started");
        while host.wait_for_frame() {
            let dt = self.clock.tick();
            update_world_time(scene.world_mut(), dt);
            let delta = scene.time().delta;
            host.frame(scene, delta);
            self.frames += 1;
        }
        info!("frame loop stopped after {} frames", self.frames);
        self.frames
    }
}

/// Host without a window: runs a fixed number of frames as fast as possible
/// and draws into a [`RecordingSurface`].
///
/// Loaded images are marked ready with the size read from their PNG header;
/// anything else is marked failed.
pub struct HeadlessHost {
    surface: RecordingSurface,
    remaining: u64,
}

impl HeadlessHost {
    pub fn new(width: f32, height: f32, frames: u64) -> Self {
        Self {
            surface: RecordingSurface::new(width, height),
            remaining: frames,
        }
    }

    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }
}

impl FrameHost for HeadlessHost {
    fn wait_for_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    fn frame(&mut self, scene: &mut Scene, delta: f32) {
        for image in scene.images_mut().drain_loaded() {
            match png_dimensions(&image.bytes) {
                Some((w, h)) => scene.images_mut().mark_ready(image.handle, w, h),
                None => scene.images_mut().mark_failed(image.handle),
            }
        }
        // Only the last frame's commands are kept.
        self.surface.commands.clear();
        run_frame(scene, &mut self.surface, delta);
        debug!("headless frame drew {} commands", self.surface.commands.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_tick_is_zero_and_stalls_are_clamped() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        assert_eq!(clock.tick_at(t0), 0.0);
        let d = clock.tick_at(t0 + Duration::from_millis(20));
        assert!((d - 0.02).abs() < 1e-4);
        assert_eq!(clock.tick_at(t0 + Duration::from_secs(3)), FrameClock::MAX_DELTA);
    }

    #[test]
    fn headless_host_runs_requested_frames() {
        let mut scene = Scene::new();
        let mut host = HeadlessHost::new(320.0, 200.0, 3);
        let mut frame_loop = FrameLoop::new();
        assert_eq!(frame_loop.run(&mut scene, &mut host), 3);
        assert_eq!(scene.time().frame_count, 3);
        assert_eq!(host.surface().depth(), 0);
    }
}
