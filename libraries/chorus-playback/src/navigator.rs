//! Queue navigation with repeat-mode semantics
//!
//! Decides the next song to play given the repeat mode and queue
//! exhaustion, and commands playback through [`PlaybackControl`].
//! The queue itself never wraps; all wraparound lives here.

use crate::queue::Queue;
use crate::types::{RepeatMode, Song};
use tracing::debug;

/// Playback commands the navigator issues
///
/// Implemented by whatever drives the audio engine (in this crate,
/// typically a thin adapter over [`crate::engine::PlaybackEngine`]).
pub trait PlaybackControl {
    /// Start playing a new song from the beginning
    fn play_song(&mut self, song: &Song);

    /// Seek within the current song
    fn seek_to(&mut self, position_ms: u64);

    /// Halt playback
    fn stop(&mut self);
}

/// Skip to the next song
///
/// - Repeat one: the current song restarts from 0; no queue movement.
/// - Otherwise the queue advances; at the end, repeat all rebuilds the
///   queue from the start (re-shuffling if it was shuffled) while
///   repeat off stops playback and returns `None`.
pub fn skip_to_next(
    queue: &mut Queue,
    repeat: RepeatMode,
    control: &mut dyn PlaybackControl,
) -> Option<Song> {
    debug!(?repeat, position = queue.position(), len = queue.len(), "skip to next");

    if repeat == RepeatMode::One {
        control.seek_to(0);
        return queue.current_song().cloned();
    }

    if let Some(next) = queue.next() {
        control.play_song(&next);
        return Some(next);
    }

    if repeat == RepeatMode::All {
        return wrap_to_start(queue, control);
    }

    debug!("end of queue, no repeat - stopping");
    control.stop();
    None
}

/// Skip to the previous song
///
/// At the start of the queue, repeat all wraps to the end; otherwise
/// the still-current song is returned unchanged. Previous-at-start is
/// deliberately a no-op, not a restart.
pub fn skip_to_previous(
    queue: &mut Queue,
    repeat: RepeatMode,
    control: &mut dyn PlaybackControl,
) -> Option<Song> {
    if let Some(previous) = queue.previous() {
        control.play_song(&previous);
        return Some(previous);
    }

    if repeat == RepeatMode::All {
        return wrap_to_end(queue, control);
    }

    queue.current_song().cloned()
}

/// Rebuild the queue at its start for repeat-all wraparound
fn wrap_to_start(queue: &mut Queue, control: &mut dyn PlaybackControl) -> Option<Song> {
    let playlist = queue.original_playlist().to_vec();
    let was_shuffled = queue.is_shuffled();
    debug!(len = playlist.len(), was_shuffled, "repeat all - wrapping to start");

    queue.set_playlist(playlist, 0);
    if was_shuffled {
        queue.shuffle();
    }

    let first = queue.current_song().cloned()?;
    control.play_song(&first);
    Some(first)
}

/// Rebuild the queue at its end for repeat-all wraparound in reverse
fn wrap_to_end(queue: &mut Queue, control: &mut dyn PlaybackControl) -> Option<Song> {
    let playlist = queue.original_playlist().to_vec();
    let was_shuffled = queue.is_shuffled();
    if playlist.is_empty() {
        return None;
    }
    debug!(len = playlist.len(), was_shuffled, "repeat all - wrapping to end");

    let last_index = playlist.len() - 1;
    queue.set_playlist(playlist, last_index);
    if was_shuffled {
        // Shuffling pins the current song to the front; walk forward to
        // the last position so previous-from-here keeps working.
        queue.shuffle();
        for _ in 0..last_index {
            queue.next();
        }
    }

    let last = queue.current_song().cloned()?;
    control.play_song(&last);
    Some(last)
}
