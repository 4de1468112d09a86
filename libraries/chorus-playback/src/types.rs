//! Core types for playback orchestration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Song information for queue management
///
/// Contains the metadata needed for playback and display.
/// Songs are copied by value into queues; whichever collection
/// holds a copy owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier
    pub id: String,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    pub album: Option<String>,

    /// Track number in album (optional)
    pub track_number: Option<u32>,

    /// Ordering hint from the source collection
    pub sort_order: u32,
}

/// Playback status as seen by listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// Nothing loaded yet
    Idle,

    /// Currently playing
    Playing,

    /// Paused mid-song
    Paused,

    /// Playback halted (end of queue, error, explicit stop)
    Stopped,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when queue ends
    Off,

    /// Loop entire queue
    All,

    /// Loop current song only
    One,
}

impl Default for RepeatMode {
    fn default() -> Self {
        RepeatMode::Off
    }
}

/// Configuration for the playback engine and session manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Delay before retrying the same song after a transient
    /// network error (default: 2 seconds)
    pub retry_delay: Duration,

    /// Delay before skipping to the next song after an
    /// unrecoverable error (default: 1 second)
    pub skip_delay: Duration,

    /// Interval between periodic session saves while actively
    /// playing (default: 10 seconds)
    pub save_interval: Duration,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(2),
            skip_delay: Duration::from_secs(1),
            save_interval: Duration::from_secs(10),
            repeat: RepeatMode::Off,
        }
    }
}
