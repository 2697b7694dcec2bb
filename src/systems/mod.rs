//! Engine systems.
//!
//! Submodules overview
//! - [`commit`] – the deferred creation and destruction point
//! - [`frame`] – one scheduling pass over the live objects
//! - [`frameloop`] – clock, host trait and the loop driving frames
//! - `input` – read raylib input into [`crate::resources::input::InputState`] (feature `raylib`)
//! - [`propagate_transforms`] – world transforms through the parent chain
//! - [`time`] – update simulation time and delta

pub mod commit;
pub mod frame;
pub mod frameloop;
#[cfg(feature = "raylib")]
pub mod input;
pub mod propagate_transforms;
pub mod time;
