//! scenekit2d library.
//!
//! A 2D scene-graph engine: game objects with local transforms composed
//! through a parent/child hierarchy, pluggable components driven by a
//! per-frame scheduler, deferred creation and destruction, and an abstract
//! render surface with a raylib backend.
//!
//! - [`scene`] – the object registry and its public API
//! - [`context`] – what every hook receives
//! - [`behaviors`] – component and object traits plus the built-in components
//! - [`components`] – ECS data stored per object
//! - [`resources`] – session-wide state (camera, input, time, images, config)
//! - [`systems`] – frame scheduling, commit point, transform composition, loop
//! - [`render`] – the render surface contract and its backends
//! - [`engine`] – configuration, scene and loop bundled into one session

pub mod behaviors;
pub mod components;
pub mod context;
pub mod engine;
pub mod error;
pub mod events;
pub mod game;
pub mod math;
pub mod render;
pub mod resources;
pub mod scene;
pub mod snapshot;
pub mod systems;
