//! Session snapshot persistence
//!
//! [`SessionStore`] abstracts where snapshots live. [`JsonFileStore`]
//! writes a single JSON file; [`MemoryStore`] backs tests.

use crate::error::Result;
use crate::session::PlaybackSession;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Backend for saving and loading playback sessions
pub trait SessionStore: Send {
    /// Persist a session snapshot, replacing any previous one
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be written.
    fn save(&mut self, session: &PlaybackSession) -> Result<()>;

    /// Load the last persisted session, if any
    ///
    /// An absent or unreadable snapshot is not an error; it loads as
    /// `None` so startup proceeds with a fresh state.
    ///
    /// # Errors
    /// Returns an error only for I/O failures other than the snapshot
    /// being missing.
    fn load(&mut self) -> Result<Option<PlaybackSession>>;
}

/// File-backed store serializing the session as JSON
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store writing to the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for JsonFileStore {
    fn save(&mut self, session: &PlaybackSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(session)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), revision = session.revision, "session saved");
        Ok(())
    }

    fn load(&mut self) -> Result<Option<PlaybackSession>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&json) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A corrupt snapshot should not wedge startup.
                warn!(path = %self.path.display(), error = %e, "discarding unreadable session");
                Ok(None)
            }
        }
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStore {
    session: Option<PlaybackSession>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn save(&mut self, session: &PlaybackSession) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn load(&mut self) -> Result<Option<PlaybackSession>> {
        Ok(self.session.clone())
    }
}
