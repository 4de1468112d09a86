//! Playback engine state machine
//!
//! Owns the play/pause/stop/prepare lifecycle against the external
//! audio engine and reacts to its callbacks (ready, ended, is-playing,
//! error). Everything here is command-and-callback: prepare/seek/play
//! are asynchronous on the engine side and the callbacks below are the
//! only resumption points.
//!
//! The engine never sleeps or spawns. Delayed recovery work (retry a
//! song, skip to the next) is surfaced as [`EngineDirective`] values
//! the orchestrator drains and schedules; each carries a
//! [`RecoveryToken`] that a later `prepare_song` invalidates, so a
//! stale retry never fires after the user navigated away.

use crate::error::Result;
use crate::listeners::ListenerManager;
use crate::media::{MediaResolver, MediaSource, OfflineModeFlag};
use crate::types::{PlaybackConfig, PlaybackStatus, Song};
use std::time::Duration;
use tracing::{debug, error, warn};

/// External audio engine collaborator
///
/// Commands are fire-and-forget; outcomes arrive through the
/// `PlaybackEngine::on_*` callbacks.
pub trait AudioEngine: Send {
    /// Load a media source, optionally starting playback once ready
    ///
    /// # Errors
    /// Returns an error only for immediate command failures; playback
    /// errors during streaming arrive through `on_error`.
    fn prepare(&mut self, source: MediaSource, play_when_ready: bool) -> Result<()>;

    /// Resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Halt playback
    fn stop(&mut self);

    /// Seek within the loaded song
    fn seek_to(&mut self, position_ms: u64);

    /// Set output volume in `[0.0, 1.0]`
    fn set_volume(&mut self, volume: f32);

    /// Current position in milliseconds
    fn position_ms(&self) -> u64;

    /// Loaded song duration in milliseconds
    fn duration_ms(&self) -> u64;

    /// Whether audio is currently rendering
    fn is_playing(&self) -> bool;
}

/// Error reported by the audio engine
#[derive(Debug, Clone)]
pub struct EngineError {
    /// Coarse failure code from the engine
    pub code: EngineErrorCode,

    /// Raw error payload (may contain HTTP status markers)
    pub message: String,
}

/// Failure codes the external engine distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorCode {
    /// Connection could not be established
    NetworkConnectionFailed,

    /// Connection timed out mid-stream
    NetworkConnectionTimeout,

    /// The media itself could not be read or decoded
    Source,

    /// Anything else
    Unspecified,
}

/// Classification of an engine error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Credentials rejected; halt and re-authenticate upstream
    Authentication,

    /// Transient network failure; retry the same song once
    TransientNetwork,

    /// Unrecoverable for this song; skip to the next
    Unrecoverable,
}

/// Classify an engine error per the recovery policy
pub fn classify(error: &EngineError) -> ErrorClass {
    let message = &error.message;
    let is_auth = message.contains("401")
        || message.contains("403")
        || message.contains("Unauthorized")
        || message.contains("Forbidden");
    if is_auth {
        return ErrorClass::Authentication;
    }

    match error.code {
        EngineErrorCode::NetworkConnectionFailed | EngineErrorCode::NetworkConnectionTimeout => {
            ErrorClass::TransientNetwork
        }
        EngineErrorCode::Source | EngineErrorCode::Unspecified => ErrorClass::Unrecoverable,
    }
}

/// Token scoping scheduled recovery to the song it applies to
///
/// Obtained inside a directive; check with
/// [`PlaybackEngine::token_valid`] before executing the delayed work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryToken(u64);

/// Work the orchestrator must carry out for the engine
#[derive(Debug, Clone)]
pub enum EngineDirective {
    /// The current song finished; advance the queue
    SongEnded,

    /// Authentication failed; hand control to the re-login flow
    ReAuthenticate,

    /// Retry the given song after `delay` if the token still holds
    RetryAfter {
        /// Song to retry
        song: Song,
        /// How long to wait before retrying
        delay: Duration,
        /// Validity token checked at execution time
        token: RecoveryToken,
    },

    /// Skip to the next song after `delay` if the token still holds
    SkipAfter {
        /// How long to wait before skipping
        delay: Duration,
        /// Validity token checked at execution time
        token: RecoveryToken,
    },
}

/// Playback lifecycle state machine
///
/// Listener-visible status is [`PlaybackStatus`]; the preparing phase
/// between `prepare_song` and `on_ready` is internal.
pub struct PlaybackEngine {
    audio: Box<dyn AudioEngine>,
    resolver: Box<dyn MediaResolver>,
    offline: Box<dyn OfflineModeFlag>,
    config: PlaybackConfig,

    status: PlaybackStatus,
    current_song: Option<Song>,
    preparing: bool,

    /// Seek issued on the next ready callback (session restore)
    pending_seek_ms: Option<u64>,

    /// Bumped by every prepare; stamps recovery tokens
    generation: u64,

    /// Directives awaiting the orchestrator
    directives: Vec<EngineDirective>,
}

impl PlaybackEngine {
    /// Create an engine over its collaborators
    pub fn new(
        audio: Box<dyn AudioEngine>,
        resolver: Box<dyn MediaResolver>,
        offline: Box<dyn OfflineModeFlag>,
        config: PlaybackConfig,
    ) -> Self {
        Self {
            audio,
            resolver,
            offline,
            config,
            status: PlaybackStatus::Idle,
            current_song: None,
            preparing: false,
            pending_seek_ms: None,
            generation: 0,
            directives: Vec::new(),
        }
    }

    // ===== Prepare =====

    /// Prepare a new song and play it once ready
    ///
    /// Resolves the media source through the offline-mode flag, then
    /// commands the engine. Invalidates any pending recovery for the
    /// previous song.
    pub fn prepare_song(&mut self, song: Song) -> Result<()> {
        debug!(id = %song.id, title = %song.title, "preparing new song");
        self.begin_prepare(&song)?;
        self.current_song = Some(song);
        Ok(())
    }

    /// Prepare a song paused at a saved position (session restore)
    ///
    /// The engine loads the song without auto-playing and seeks to
    /// `position_ms` once ready.
    pub fn prepare_song_paused(&mut self, song: Song, position_ms: u64) -> Result<()> {
        debug!(id = %song.id, position_ms, "preparing song for resume");
        self.generation += 1;
        self.preparing = true;
        self.pending_seek_ms = Some(position_ms);
        let source = self.resolve(&song)?;
        self.audio.prepare(source, false)?;
        self.current_song = Some(song);
        Ok(())
    }

    fn begin_prepare(&mut self, song: &Song) -> Result<()> {
        self.generation += 1;
        self.preparing = true;
        self.pending_seek_ms = None;
        let source = self.resolve(song)?;
        self.audio.prepare(source, true)
    }

    fn resolve(&self, song: &Song) -> Result<MediaSource> {
        let offline = self.offline.is_offline();
        debug!(offline, "resolving media source");
        self.resolver.resolve(song, offline)
    }

    // ===== Playback control =====

    /// Resume playback if not already playing
    pub fn play(&mut self) {
        if !self.audio.is_playing() {
            self.audio.play();
        }
    }

    /// Pause playback if currently playing
    pub fn pause(&mut self) {
        if self.audio.is_playing() {
            self.audio.pause();
        }
    }

    /// Halt playback and notify listeners
    pub fn stop(&mut self, listeners: &ListenerManager) {
        self.audio.stop();
        self.preparing = false;
        self.status = PlaybackStatus::Stopped;
        listeners.notify_playback_state_changed(self.status);
    }

    /// Seek within the current song
    pub fn seek_to(&mut self, position_ms: u64) {
        self.audio.seek_to(position_ms);
    }

    /// Set output volume in `[0.0, 1.0]`
    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume.clamp(0.0, 1.0));
    }

    // ===== Engine callbacks =====

    /// The engine finished loading the prepared song
    pub fn on_ready(&mut self, listeners: &ListenerManager) {
        self.preparing = false;
        if let Some(position_ms) = self.pending_seek_ms.take() {
            self.audio.seek_to(position_ms);
        }
        listeners.notify_song_changed(self.current_song.as_ref());
    }

    /// The current song played to its end
    pub fn on_ended(&mut self) {
        debug!("song ended");
        self.directives.push(EngineDirective::SongEnded);
    }

    /// The engine started or stopped rendering audio
    pub fn on_is_playing_changed(&mut self, is_playing: bool, listeners: &ListenerManager) {
        self.status = if is_playing {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        };
        debug!(status = ?self.status, "is-playing changed");
        listeners.notify_playback_state_changed(self.status);
    }

    /// The engine reported a playback error
    ///
    /// Status always goes to `Stopped` and listeners are notified
    /// before any recovery is raised, so observers see a consistent
    /// stopped state rather than silence.
    pub fn on_error(&mut self, engine_error: EngineError, listeners: &ListenerManager) {
        error!(code = ?engine_error.code, message = %engine_error.message, "engine error");
        let class = classify(&engine_error);

        self.preparing = false;
        self.pending_seek_ms = None;
        self.status = PlaybackStatus::Stopped;
        listeners.notify_playback_state_changed(self.status);

        let token = RecoveryToken(self.generation);
        match class {
            ErrorClass::Authentication => {
                warn!("authentication error - halting for re-login");
                self.directives.push(EngineDirective::ReAuthenticate);
            }
            ErrorClass::TransientNetwork => {
                if let Some(song) = self.current_song.clone() {
                    warn!(id = %song.id, delay = ?self.config.retry_delay, "network error - scheduling retry");
                    self.directives.push(EngineDirective::RetryAfter {
                        song,
                        delay: self.config.retry_delay,
                        token,
                    });
                }
            }
            ErrorClass::Unrecoverable => {
                warn!(delay = ?self.config.skip_delay, "unrecoverable error - scheduling skip");
                self.directives.push(EngineDirective::SkipAfter {
                    delay: self.config.skip_delay,
                    token,
                });
            }
        }
    }

    // ===== Directives =====

    /// Drain directives raised since the last call
    pub fn take_directives(&mut self) -> Vec<EngineDirective> {
        std::mem::take(&mut self.directives)
    }

    /// Whether a recovery token still refers to the active song
    ///
    /// A token goes stale on the next prepare; the scheduler must
    /// check it when the delay elapses, not when the work is queued.
    pub fn token_valid(&self, token: RecoveryToken) -> bool {
        token.0 == self.generation
    }

    // ===== State queries =====

    /// Listener-visible playback status
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// The song the engine currently holds
    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    /// Whether a prepare is in flight
    pub fn is_preparing(&self) -> bool {
        self.preparing
    }

    /// Current position in milliseconds
    pub fn position_ms(&self) -> u64 {
        self.audio.position_ms()
    }

    /// Current song duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.audio.duration_ms()
    }

    /// Whether audio is currently rendering
    pub fn is_playing(&self) -> bool {
        self.audio.is_playing()
    }
}
