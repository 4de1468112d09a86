//! Media source resolution
//!
//! The playback core never touches the filesystem or network itself;
//! the consuming application resolves a song to either a local file
//! (offline) or a streaming URL with credentials (online).

use crate::error::Result;
use crate::types::Song;
use std::path::PathBuf;

/// A playable reference handed to the audio engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Downloaded file on local storage
    Local(PathBuf),

    /// Network stream with its authorization header
    Stream {
        /// Streaming URL for the song
        url: String,
        /// `Authorization` header value for the request
        auth_header: String,
    },
}

/// Resolves a song to a playable media source
///
/// `offline` selects the local-file path; otherwise the resolver
/// produces a streaming source. Resolution may involve I/O on the
/// implementor's side and must not assume it is cheap.
pub trait MediaResolver: Send {
    /// Resolve `song` to a source for the requested mode
    ///
    /// # Errors
    /// [`crate::PlaybackError::MediaResolution`] when the song has no
    /// playable source (e.g. not downloaded while offline), or
    /// [`crate::PlaybackError::AuthenticationRequired`] when streaming
    /// credentials are missing.
    fn resolve(&self, song: &Song, offline: bool) -> Result<MediaSource>;
}

/// Externally-owned offline-mode flag
///
/// Queried at every prepare/restore to pick the local or streaming
/// resolution path.
pub trait OfflineModeFlag: Send {
    /// Whether the application is currently in offline mode
    fn is_offline(&self) -> bool;
}
