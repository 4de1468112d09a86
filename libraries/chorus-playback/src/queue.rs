//! Playback queue with dual orderings
//!
//! Holds the playlist in two sequences:
//! - `original_playlist`: the canonical order as the source presented it
//! - `current_queue`: the order actually being played, a permutation of
//!   the original while shuffled, element-for-element equal otherwise
//!
//! Mutations keep both sequences synchronized only while unshuffled;
//! while shuffled the original list is the pre-shuffle canonical order
//! and ad-hoc edits touch the current queue alone (except appends noted
//! per method).

use crate::shuffle::{shuffle_songs, shuffled_remainder};
use crate::types::Song;
use tracing::debug;

/// Queue over a playlist with a current-position pointer
///
/// `position` always stays in `[0, len)` while the queue is non-empty.
/// Navigation here never wraps; repeat-mode wraparound is the
/// navigator's job.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// The playlist as the user/source presented it
    original_playlist: Vec<Song>,

    /// The sequence actually being played
    current_queue: Vec<Song>,

    /// Index into `current_queue`; meaningless when empty
    position: usize,

    /// Whether `current_queue` is currently a shuffled permutation
    shuffled: bool,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both sequences with a new playlist
    ///
    /// Clamps `start_index` into bounds and resets the shuffle flag.
    pub fn set_playlist(&mut self, songs: Vec<Song>, start_index: usize) {
        debug!(len = songs.len(), start_index, "setting playlist");
        self.position = if songs.is_empty() {
            0
        } else {
            start_index.min(songs.len() - 1)
        };
        self.original_playlist = songs.clone();
        self.current_queue = songs;
        self.shuffled = false;
    }

    /// Get the song at the current position
    pub fn current_song(&self) -> Option<&Song> {
        self.current_queue.get(self.position)
    }

    /// Shuffle the queue, keeping the audible song first
    ///
    /// The song playing when shuffle is engaged is pinned to position 0
    /// so toggling shuffle never changes what the user hears; the rest
    /// of the playlist is Fisher-Yates permuted after it. Without a
    /// current song the entire playlist is permuted.
    pub fn shuffle(&mut self) {
        if self.original_playlist.is_empty() {
            return;
        }

        if let Some(current) = self.current_song().cloned() {
            let remainder = shuffled_remainder(&self.original_playlist, &current);
            let mut queue = Vec::with_capacity(remainder.len() + 1);
            queue.push(current);
            queue.extend(remainder);
            self.current_queue = queue;
        } else {
            let mut queue = self.original_playlist.clone();
            shuffle_songs(&mut queue);
            self.current_queue = queue;
        }

        self.position = 0;
        self.shuffled = true;
        debug!(len = self.current_queue.len(), "queue shuffled");
    }

    /// Restore the original order
    ///
    /// Relocates the current song in the restored order, falling back
    /// to 0 if it is gone (e.g. removed while shuffled).
    pub fn unshuffle(&mut self) {
        if self.original_playlist.is_empty() {
            return;
        }

        let current = self.current_song().cloned();
        self.current_queue = self.original_playlist.clone();
        self.shuffled = false;
        self.position = current
            .and_then(|song| self.current_queue.iter().position(|s| s.id == song.id))
            .unwrap_or(0);
        debug!(position = self.position, "queue unshuffled");
    }

    /// Advance to the next song
    ///
    /// Returns `None` at the end of the queue, leaving the position
    /// unchanged (no wraparound).
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Song> {
        if self.current_queue.is_empty() {
            return None;
        }

        if self.position < self.current_queue.len() - 1 {
            self.position += 1;
            return Some(self.current_queue[self.position].clone());
        }

        None // End of queue
    }

    /// Step back to the previous song
    ///
    /// Returns `None` at the beginning of the queue, leaving the
    /// position unchanged.
    pub fn previous(&mut self) -> Option<Song> {
        if self.current_queue.is_empty() {
            return None;
        }

        if self.position > 0 {
            self.position -= 1;
            return Some(self.current_queue[self.position].clone());
        }

        None // Beginning of queue
    }

    /// Append a song to the end of the queue
    ///
    /// Mirrored into the original playlist only while unshuffled.
    /// No-op on an empty queue (nothing is playing to append after).
    pub fn add_to_queue(&mut self, song: Song) {
        if self.current_queue.is_empty() {
            return;
        }

        if !self.shuffled {
            self.original_playlist.push(song.clone());
        }
        self.current_queue.push(song);
    }

    /// Append multiple songs to the end of the queue
    pub fn add_all_to_queue(&mut self, songs: Vec<Song>) {
        if self.current_queue.is_empty() || songs.is_empty() {
            return;
        }

        if !self.shuffled {
            self.original_playlist.extend(songs.clone());
        }
        self.current_queue.extend(songs);
    }

    /// Insert a song immediately after the current position
    ///
    /// While unshuffled, also inserts into the original playlist right
    /// after the current song's original index.
    pub fn add_next(&mut self, song: Song) {
        if self.current_queue.is_empty() {
            return;
        }

        if !self.shuffled {
            let original_index = self.current_song().and_then(|current| {
                self.original_playlist.iter().position(|s| s.id == current.id)
            });
            if let Some(index) = original_index {
                self.original_playlist.insert(index + 1, song.clone());
            }
        }

        let insert_at = (self.position + 1).min(self.current_queue.len());
        self.current_queue.insert(insert_at, song);
    }

    /// Remove the song at `index` from the queue
    ///
    /// Returns `false` for an out-of-range index or for the currently
    /// playing index (the audible song is never removable here). On
    /// success the position shifts down when the removal was before it,
    /// and the removal is mirrored into the original playlist by song
    /// identity while unshuffled.
    pub fn remove_from_queue(&mut self, index: usize) -> bool {
        if index >= self.current_queue.len() {
            return false;
        }
        if index == self.position {
            return false; // Never remove the playing song
        }

        let removed = self.current_queue.remove(index);
        if index < self.position {
            self.position -= 1;
        }

        if !self.shuffled {
            self.original_playlist.retain(|s| s.id != removed.id);
        }

        debug!(index, id = %removed.id, "removed from queue");
        true
    }

    /// Move the song at `from` to `to`
    ///
    /// Returns `false` for out-of-range positions or a no-op move.
    /// The position pointer follows the standard array-move adjustment
    /// so the audible song is unaffected.
    pub fn move_queue_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.current_queue.len() || to >= self.current_queue.len() {
            return false;
        }
        if from == to {
            return false;
        }

        let song = self.current_queue.remove(from);
        self.current_queue.insert(to, song);

        if !self.shuffled {
            let song = self.original_playlist.remove(from);
            self.original_playlist.insert(to, song);
        }

        if from == self.position {
            self.position = to;
        } else if from < self.position && to >= self.position {
            self.position -= 1;
        } else if from > self.position && to <= self.position {
            self.position += 1;
        }

        debug!(from, to, position = self.position, "moved queue item");
        true
    }

    /// Jump directly to a queue position
    ///
    /// Returns the song there (the caller is expected to start playing
    /// it), or `None` for an out-of-range index.
    pub fn jump_to_position(&mut self, index: usize) -> Option<Song> {
        if index >= self.current_queue.len() {
            return None;
        }

        self.position = index;
        self.current_song().cloned()
    }

    /// Whether a song follows the current position
    pub fn has_next(&self) -> bool {
        !self.current_queue.is_empty() && self.position < self.current_queue.len() - 1
    }

    /// Whether a song precedes the current position
    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Current position in the queue
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of songs in the queue
    pub fn len(&self) -> usize {
        self.current_queue.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.current_queue.is_empty()
    }

    /// Whether the queue is currently shuffled
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// The canonical, unshuffled order
    pub fn original_playlist(&self) -> &[Song] {
        &self.original_playlist
    }

    /// The queue in play order
    pub fn contents(&self) -> &[Song] {
        &self.current_queue
    }

    /// Songs after the current position
    pub fn upcoming(&self) -> &[Song] {
        if self.position + 1 < self.current_queue.len() {
            &self.current_queue[self.position + 1..]
        } else {
            &[]
        }
    }
}
