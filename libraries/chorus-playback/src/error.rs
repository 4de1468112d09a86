//! Error types for playback orchestration

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The audio engine rejected a command
    #[error("Audio engine error: {0}")]
    Engine(String),

    /// A song could not be resolved to a playable media source
    #[error("Media resolution failed: {0}")]
    MediaResolution(String),

    /// Streaming credentials are missing or rejected
    #[error("Authentication required")]
    AuthenticationRequired,

    /// IO error from the session store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
