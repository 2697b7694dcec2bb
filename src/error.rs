//! Error types for the scene engine.

use thiserror::Error;

/// Errors raised synchronously by the scene API and by component hooks.
///
/// Every variant aborts the call that produced it without leaving the
/// registry partially mutated.
#[derive(Error, Debug)]
pub enum EngineError {
    /// An object with this id is already live or waiting to be committed.
    #[error("game object with id <{0}> already exists")]
    DuplicateId(String),

    /// No live object matches the id or handle.
    #[error("game object <{0}> doesn't exist")]
    ObjectNotFound(String),

    /// The object type name was never registered.
    #[error("<{0}> is not a registered game object type")]
    InvalidObjectType(String),

    /// The component type name was never registered.
    #[error("<{0}> is not a registered component type")]
    InvalidComponentType(String),

    /// An animator was asked for a clip it does not own.
    #[error("animation with name <{0}> doesn't exist")]
    UnknownAnimation(String),

    /// Failure reported by user hook code.
    #[error("{0}")]
    Hook(String),

    /// Configuration file could not be read or written.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for scene operations and hooks.
pub type Result<T> = std::result::Result<T, EngineError>;
