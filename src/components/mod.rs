//! ECS components stored on game object entities.
//!
//! Submodules overview:
//! - [`attached`] – the pluggable [`GameComponent`](crate::behaviors::GameComponent)s of an object
//! - [`gameobject`] – id, lifecycle state, live marker and the object's own behavior
//! - [`globaltransform2d`] – computed world-space transform
//! - [`hierarchy`] – non-owning parent and children links
//! - [`sortlayer`] – update and draw ordering
//! - [`transform`] – local position, angle, scale and pivot

pub mod attached;
pub mod gameobject;
pub mod globaltransform2d;
pub mod hierarchy;
pub mod sortlayer;
pub mod transform;
