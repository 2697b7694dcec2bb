//! Engine session: configuration, scene and frame loop in one place.

use log::info;

use crate::resources::engineconfig::EngineConfig;
use crate::scene::Scene;
use crate::snapshot::SceneSnapshot;
use crate::systems::frameloop::{FrameHost, FrameLoop};

pub struct Engine {
    config: EngineConfig,
    scene: Scene,
    frame_loop: FrameLoop,
    initialized: bool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            scene: Scene::new(),
            frame_loop: FrameLoop::new(),
            initialized: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Apply the configuration to the scene resources and start the image
    /// loader. Running the engine calls this if it has not been called yet.
    ///
    /// The existing input and image resources are updated in place, so
    /// images requested and input recorded while setting up the scene survive.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.scene.input_mut().pixel_scale = self.config.pixel_scale;
        self.scene
            .images_mut()
            .start_loader(Some(self.config.asset_root.as_path()));
        self.scene.world_mut().insert_resource(self.config.clone());
        self.initialized = true;
        info!(
            "engine initialized: {}x{} surface, assets under {:?}",
            self.config.width, self.config.height, self.config.asset_root
        );
    }

    /// Run frames until `host` stops. Returns the number of frames run.
    pub fn run<H: FrameHost>(&mut self, host: &mut H) -> u64 {
        self.init();
        self.frame_loop.run(&mut self.scene, host)
    }

    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.scene)
    }

    /// Stop background work. Also happens on drop.
    pub fn shutdown(&mut self) {
        self.scene.images_mut().shutdown();
        info!("engine shut down after {} frames", self.frames());
    }
}
