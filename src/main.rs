//! scenekit2d demo runner.
//!
//! Runs one of the bundled demos either in a raylib window (feature
//! `raylib`) or headless for a fixed number of frames.
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features raylib -- --demo knight
//! cargo run -- --headless --frames 300 --demo ball --dump-scene
//! ```

// Do not create console on Windows
#![cfg_attr(
    all(target_os = "windows", feature = "raylib"),
    windows_subsystem = "windows"
)]

use clap::Parser;
use std::path::PathBuf;

use scenekit2d::engine::Engine;
use scenekit2d::game::{self, Demo};
use scenekit2d::resources::engineconfig::EngineConfig;
use scenekit2d::systems::frameloop::HeadlessHost;

/// scenekit2d
#[derive(Parser)]
#[command(version, about = "2D scene-graph engine demos")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Surface width in pixels, overriding the config file.
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels, overriding the config file.
    #[arg(long)]
    height: Option<u32>,

    /// Window pixels per surface pixel, overriding the config file.
    #[arg(long)]
    pixel_scale: Option<f32>,

    /// Run without a window.
    #[arg(long)]
    headless: bool,

    /// Frames to run when headless.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Demo scene to load.
    #[arg(long, value_enum, default_value_t = Demo::Ball)]
    demo: Demo,

    /// Print the scene as JSON when the run ends.
    #[arg(long)]
    dump_scene: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = EngineConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::info!("using default configuration ({e})");
    }
    config.set_size(cli.width, cli.height);
    if let Some(scale) = cli.pixel_scale.filter(|s| *s > 0.0) {
        config.pixel_scale = scale;
    }

    let mut engine = Engine::new(config);
    engine.init();
    if let Err(e) = game::setup(engine.scene_mut(), cli.demo) {
        eprintln!("Error setting up the demo: {e}");
        std::process::exit(1);
    }

    if cli.headless || !cfg!(feature = "raylib") {
        if !cli.headless {
            log::warn!("built without the raylib feature, running headless");
        }
        let config = engine.config();
        let mut host = HeadlessHost::new(config.width as f32, config.height as f32, cli.frames);
        engine.run(&mut host);
    } else {
        run_windowed(&mut engine);
    }

    if cli.dump_scene {
        match engine.snapshot().to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing the scene: {e}");
                std::process::exit(1);
            }
        }
    }
    engine.shutdown();
}

#[cfg(feature = "raylib")]
fn run_windowed(engine: &mut Engine) {
    let mut host = scenekit2d::render::raylib_backend::RaylibHost::new(engine.config());
    engine.run(&mut host);
}

#[cfg(not(feature = "raylib"))]
fn run_windowed(_engine: &mut Engine) {}
