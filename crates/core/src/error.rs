//! Error types for Tesela

use thiserror::Error;

/// Main error type for Tesela operations.
///
/// Every variant is fatal to the calling request: lookups against the static
/// configuration tables have no fallback, and a spec that cannot be built is
/// rejected wholesale. Errors propagate to the caller's own handling.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown sensor: {0}")]
    UnknownSensor(String),

    #[error("unknown scene id prefix '{prefix}' in scene '{scene_id}'")]
    UnknownScenePrefix { prefix: String, scene_id: String },

    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("invalid scene id '{scene_id}': {reason}")]
    InvalidSceneId { scene_id: String, reason: String },

    #[error("manual spec has no scene ids")]
    EmptyScenes,

    #[error("no native resolution known for any requested band: {bands:?}")]
    UnknownResolution { bands: Vec<String> },

    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Result type alias for Tesela operations.
pub type Result<T> = std::result::Result<T, Error>;
