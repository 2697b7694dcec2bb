//! Event types exchanged between the scheduler and game code.
//!
//! Submodules:
//! - [`lifecycle`] – init/start/update/physics_update/draw/dispose payloads
pub mod lifecycle;
