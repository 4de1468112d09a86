//! Session save and restore
//!
//! Snapshots the playback session (song, position, queue, shuffle and
//! repeat settings) through a [`SessionStore`] so the app reopens
//! where it left off.

use crate::controller::ShuffleRepeatController;
use crate::error::Result;
use crate::listeners::ListenerManager;
use crate::queue::Queue;
use crate::store::SessionStore;
use crate::types::{RepeatMode, Song};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A persisted playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSession {
    /// The song that was playing
    pub song: Song,

    /// Playback position within the song, in milliseconds
    pub position_ms: u64,

    /// Queue contents in play order at save time
    pub queue: Vec<Song>,

    /// Index of `song` within `queue`
    pub queue_position: usize,

    /// Whether shuffle was enabled
    pub shuffled: bool,

    /// Repeat mode at save time
    pub repeat_mode: RepeatMode,

    /// Monotonic save counter; newer snapshots carry larger values
    pub revision: u64,
}

/// What the caller must do to resume playback after a restore
///
/// Prepare `song` without auto-playing and seek to `position_ms` once
/// the engine reports ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDirective {
    /// Song to reload
    pub song: Song,

    /// Position to seek to, in milliseconds
    pub position_ms: u64,
}

/// Saves and restores playback sessions
pub struct SessionStateManager {
    store: Box<dyn SessionStore>,
    revision: u64,
}

impl SessionStateManager {
    /// Create a manager over the given store
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self { store, revision: 0 }
    }

    /// Snapshot the current session
    ///
    /// Nothing is written when there is no current song or the queue
    /// is empty; returns whether a snapshot was persisted.
    ///
    /// # Errors
    /// Returns an error if the store cannot persist the snapshot.
    pub fn save(
        &mut self,
        queue: &Queue,
        repeat_mode: RepeatMode,
        position_ms: u64,
    ) -> Result<bool> {
        let Some(song) = queue.current_song() else {
            debug!("no current song - skipping save");
            return Ok(false);
        };
        if queue.is_empty() {
            debug!("empty queue - skipping save");
            return Ok(false);
        }

        self.revision += 1;
        let session = PlaybackSession {
            song: song.clone(),
            position_ms,
            queue: queue.contents().to_vec(),
            queue_position: queue.position(),
            shuffled: queue.is_shuffled(),
            repeat_mode,
            revision: self.revision,
        };
        debug!(
            song = %session.song.title,
            position_ms,
            queue_len = session.queue.len(),
            revision = session.revision,
            "saving session"
        );
        self.store.save(&session)?;
        Ok(true)
    }

    /// Restore the last saved session into the queue and controller
    ///
    /// Rebuilds the queue at the saved song, re-applies shuffle (a
    /// fresh ordering, with the saved song kept current) and the
    /// repeat mode, then hands back a [`ResumeDirective`] for the
    /// engine. Returns `None` when there is nothing usable to restore.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn restore(
        &mut self,
        queue: &mut Queue,
        controller: &mut ShuffleRepeatController,
        listeners: &ListenerManager,
    ) -> Result<Option<ResumeDirective>> {
        let Some(session) = self.store.load()? else {
            return Ok(None);
        };
        if session.queue.is_empty() {
            warn!("saved session has an empty queue - ignoring");
            return Ok(None);
        }
        // Keep our counter ahead of what is on disk.
        self.revision = self.revision.max(session.revision);

        debug!(
            song = %session.song.title,
            position_ms = session.position_ms,
            queue_len = session.queue.len(),
            shuffled = session.shuffled,
            repeat = ?session.repeat_mode,
            "restoring session"
        );

        queue.set_playlist(session.queue, session.queue_position);
        if session.shuffled {
            controller.enable_shuffle(queue, listeners);
        }
        controller.set_repeat_mode(session.repeat_mode);
        listeners.notify_queue_changed(queue.contents());

        Ok(Some(ResumeDirective {
            song: session.song,
            position_ms: session.position_ms,
        }))
    }
}
