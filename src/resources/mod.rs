//! ECS resources shared by every object of a scene.
//!
//! Overview
//! - `camera2d` – 2D camera applied around every component draw
//! - `engineconfig` – session settings loaded from an INI file
//! - `imagestore` – asynchronous image loading and readiness
//! - `input` – keyboard and pointer state with one-frame edges
//! - `texturestore` – GPU textures of ready images (feature `raylib`)
//! - `typeregistry` – object and component types creatable by name
//! - `worldtime` – simulation time and delta
pub mod camera2d;
pub mod engineconfig;
pub mod imagestore;
pub mod input;
#[cfg(feature = "raylib")]
pub mod texturestore;
pub mod typeregistry;
pub mod worldtime;
