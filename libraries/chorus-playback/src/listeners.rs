//! Listener fan-out for playback events
//!
//! Observers register once and receive song, status, progress, and
//! queue notifications synchronously in registration order.

use crate::types::{PlaybackStatus, Song};
use std::sync::Arc;
use tracing::debug;

/// Observer contract for playback events
///
/// Implementors that do not care about queue contents can skip
/// `on_queue_changed`; it defaults to a no-op.
pub trait PlaybackObserver: Send + Sync {
    /// Playback status changed (playing, paused, stopped)
    fn on_playback_state_changed(&self, status: PlaybackStatus);

    /// A different song became current (`None` when playback cleared)
    fn on_song_changed(&self, song: Option<&Song>);

    /// Periodic progress update
    fn on_progress_changed(&self, position_ms: u64, duration_ms: u64);

    /// Queue contents changed (added/removed/reordered/shuffled)
    fn on_queue_changed(&self, _queue: &[Song]) {}
}

/// Ordered, identity-deduplicated collection of observers
///
/// Notification order is registration order; nothing more is
/// guaranteed. All notification is synchronous on the caller.
#[derive(Default)]
pub struct ListenerManager {
    listeners: Vec<Arc<dyn PlaybackObserver>>,
}

impl ListenerManager {
    /// Create an empty listener manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer
    ///
    /// Duplicates (same `Arc` identity) are ignored. When a song is
    /// active the new observer is immediately replayed the current
    /// song and status so a late-attaching observer never shows
    /// stale state.
    pub fn add_listener(
        &mut self,
        listener: Arc<dyn PlaybackObserver>,
        current_song: Option<&Song>,
        status: PlaybackStatus,
    ) {
        if self.listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            debug!("listener already registered, not adding duplicate");
            return;
        }

        if let Some(song) = current_song {
            listener.on_song_changed(Some(song));
            listener.on_playback_state_changed(status);
        }

        self.listeners.push(listener);
        debug!(count = self.listeners.len(), "listener added");
    }

    /// Unregister an observer by identity
    pub fn remove_listener(&mut self, listener: &Arc<dyn PlaybackObserver>) {
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
        debug!(count = self.listeners.len(), "listener removed");
    }

    /// Notify all observers of a status change
    pub fn notify_playback_state_changed(&self, status: PlaybackStatus) {
        debug!(count = self.listeners.len(), ?status, "notifying state change");
        for listener in &self.listeners {
            listener.on_playback_state_changed(status);
        }
    }

    /// Notify all observers of a song change
    pub fn notify_song_changed(&self, song: Option<&Song>) {
        debug!(
            count = self.listeners.len(),
            title = song.map(|s| s.title.as_str()).unwrap_or("<none>"),
            "notifying song change"
        );
        for listener in &self.listeners {
            listener.on_song_changed(song);
        }
    }

    /// Notify all observers of playback progress
    pub fn notify_progress_changed(&self, position_ms: u64, duration_ms: u64) {
        for listener in &self.listeners {
            listener.on_progress_changed(position_ms, duration_ms);
        }
    }

    /// Notify all observers of new queue contents
    pub fn notify_queue_changed(&self, queue: &[Song]) {
        debug!(
            count = self.listeners.len(),
            queue_len = queue.len(),
            "notifying queue change"
        );
        for listener in &self.listeners {
            listener.on_queue_changed(queue);
        }
    }

    /// Whether any observer is registered
    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Number of registered observers
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
