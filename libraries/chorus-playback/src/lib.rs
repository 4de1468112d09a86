//! Chorus Player - Playback Core
//!
//! Platform-agnostic playback core for Chorus Player.
//!
//! This crate provides:
//! - Playback queue with original and shuffled orderings
//! - Queue navigation with repeat-mode wraparound (Off, All, One)
//! - Shuffle toggling that keeps the current song playing
//! - Playback engine state machine with error recovery
//! - Multi-listener event fan-out with late-attach replay
//! - Session save/restore (song, position, queue, shuffle, repeat)
//!
//! # Architecture
//!
//! `chorus-playback` is completely platform-agnostic:
//! - No dependency on any audio backend
//! - No dependency on any UI framework
//! - No network stack; media resolution happens behind a trait
//!
//! Platform-specific code (audio output, media URLs, timers) is
//! provided via traits, and delayed recovery work is handed back as
//! directives rather than scheduled internally.
//!
//! # Example: Queue and Navigation
//!
//! ```rust
//! use chorus_playback::{
//!     navigator, PlaybackControl, Queue, RepeatMode, Song,
//! };
//!
//! struct NoopControl;
//!
//! impl PlaybackControl for NoopControl {
//!     fn play_song(&mut self, _song: &Song) {}
//!     fn seek_to(&mut self, _position_ms: u64) {}
//!     fn stop(&mut self) {}
//! }
//!
//! let songs: Vec<Song> = (0..3)
//!     .map(|n| Song {
//!         id: format!("song-{n}"),
//!         title: format!("Song {n}"),
//!         artist: "Artist".to_string(),
//!         album: None,
//!         track_number: Some(n + 1),
//!         sort_order: n,
//!     })
//!     .collect();
//!
//! let mut queue = Queue::new();
//! queue.set_playlist(songs, 0);
//!
//! let mut control = NoopControl;
//! let next = navigator::skip_to_next(&mut queue, RepeatMode::Off, &mut control);
//! assert_eq!(next.unwrap().id, "song-1");
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use chorus_playback::{ListenerManager, Queue, RepeatMode, ShuffleRepeatController, Song};
//!
//! let mut queue = Queue::new();
//! queue.set_playlist(
//!     vec![Song {
//!         id: "a".to_string(),
//!         title: "A".to_string(),
//!         artist: "Artist".to_string(),
//!         album: None,
//!         track_number: None,
//!         sort_order: 0,
//!     }],
//!     0,
//! );
//!
//! let listeners = ListenerManager::new();
//! let mut controller = ShuffleRepeatController::new();
//! assert!(controller.toggle_shuffle(&mut queue, &listeners));
//! assert_eq!(controller.cycle_repeat_mode(), RepeatMode::All);
//! ```

mod controller;
mod engine;
mod error;
mod listeners;
mod media;
pub mod navigator;
mod queue;
mod session;
mod shuffle;
mod store;
pub mod types;

// Public exports
pub use controller::ShuffleRepeatController;
pub use engine::{
    classify, AudioEngine, EngineDirective, EngineError, EngineErrorCode, ErrorClass,
    PlaybackEngine, RecoveryToken,
};
pub use error::{PlaybackError, Result};
pub use listeners::{ListenerManager, PlaybackObserver};
pub use media::{MediaResolver, MediaSource, OfflineModeFlag};
pub use navigator::PlaybackControl;
pub use queue::Queue;
pub use session::{PlaybackSession, ResumeDirective, SessionStateManager};
pub use store::{JsonFileStore, MemoryStore, SessionStore};
pub use types::{PlaybackConfig, PlaybackStatus, RepeatMode, Song};
