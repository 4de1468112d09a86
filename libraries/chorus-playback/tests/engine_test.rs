//! Playback engine integration tests
//!
//! Exercise the prepare/ready/error lifecycle against a scripted
//! audio engine: error recovery classes, recovery-token staleness,
//! late-listener replay and resume-from-position.

use chorus_playback::{
    AudioEngine, EngineDirective, EngineError, EngineErrorCode, ListenerManager, MediaResolver,
    MediaSource, OfflineModeFlag, PlaybackConfig, PlaybackEngine, PlaybackObserver, PlaybackStatus,
    Result, Song,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Test Doubles =====

#[derive(Default)]
struct AudioLog {
    commands: Vec<String>,
    playing: bool,
}

/// Audio engine that records commands instead of making noise.
#[derive(Clone, Default)]
struct ScriptedAudio {
    log: Arc<Mutex<AudioLog>>,
}

impl ScriptedAudio {
    fn commands(&self) -> Vec<String> {
        self.log.lock().unwrap().commands.clone()
    }

    fn set_playing(&self, playing: bool) {
        self.log.lock().unwrap().playing = playing;
    }
}

impl AudioEngine for ScriptedAudio {
    fn prepare(&mut self, source: MediaSource, play_when_ready: bool) -> Result<()> {
        let what = match source {
            MediaSource::Local(path) => format!("local:{}", path.display()),
            MediaSource::Stream { url, .. } => format!("stream:{url}"),
        };
        self.log
            .lock()
            .unwrap()
            .commands
            .push(format!("prepare({what},{play_when_ready})"));
        Ok(())
    }

    fn play(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.playing = true;
        log.commands.push("play".to_string());
    }

    fn pause(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.playing = false;
        log.commands.push("pause".to_string());
    }

    fn stop(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.playing = false;
        log.commands.push("stop".to_string());
    }

    fn seek_to(&mut self, position_ms: u64) {
        self.log
            .lock()
            .unwrap()
            .commands
            .push(format!("seek({position_ms})"));
    }

    fn set_volume(&mut self, volume: f32) {
        self.log
            .lock()
            .unwrap()
            .commands
            .push(format!("volume({volume})"));
    }

    fn position_ms(&self) -> u64 {
        0
    }

    fn duration_ms(&self) -> u64 {
        180_000
    }

    fn is_playing(&self) -> bool {
        self.log.lock().unwrap().playing
    }
}

struct UrlResolver;

impl MediaResolver for UrlResolver {
    fn resolve(&self, song: &Song, offline: bool) -> Result<MediaSource> {
        if offline {
            Ok(MediaSource::Local(format!("/cache/{}.mp3", song.id).into()))
        } else {
            Ok(MediaSource::Stream {
                url: format!("https://music.example/stream/{}", song.id),
                auth_header: "Bearer token".to_string(),
            })
        }
    }
}

struct Offline(bool);

impl OfflineModeFlag for Offline {
    fn is_offline(&self) -> bool {
        self.0
    }
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl PlaybackObserver for RecordingObserver {
    fn on_playback_state_changed(&self, status: PlaybackStatus) {
        self.events.lock().unwrap().push(format!("state:{status:?}"));
    }

    fn on_song_changed(&self, song: Option<&Song>) {
        let id = song.map(|s| s.id.as_str()).unwrap_or("none");
        self.events.lock().unwrap().push(format!("song:{id}"));
    }

    fn on_progress_changed(&self, position_ms: u64, _duration_ms: u64) {
        self.events
            .lock()
            .unwrap()
            .push(format!("progress:{position_ms}"));
    }
}

fn song(id: &str) -> Song {
    Song {
        id: id.to_string(),
        title: format!("Song {id}"),
        artist: "Artist".to_string(),
        album: None,
        track_number: None,
        sort_order: 0,
    }
}

fn engine_with(audio: ScriptedAudio, offline: bool) -> PlaybackEngine {
    PlaybackEngine::new(
        Box::new(audio),
        Box::new(UrlResolver),
        Box::new(Offline(offline)),
        PlaybackConfig::default(),
    )
}

// ===== Prepare and Ready =====

#[test]
fn test_prepare_streams_when_online() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio.clone(), false);

    engine.prepare_song(song("a")).unwrap();

    assert_eq!(
        audio.commands(),
        ["prepare(stream:https://music.example/stream/a,true)"]
    );
    assert!(engine.is_preparing());
}

#[test]
fn test_prepare_uses_local_file_when_offline() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio.clone(), true);

    engine.prepare_song(song("a")).unwrap();

    assert_eq!(audio.commands(), ["prepare(local:/cache/a.mp3,true)"]);
}

#[test]
fn test_ready_notifies_song_changed() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio.clone(), false);
    let mut listeners = ListenerManager::new();
    let observer = Arc::new(RecordingObserver::default());
    listeners.add_listener(observer.clone(), None, PlaybackStatus::Idle);

    engine.prepare_song(song("a")).unwrap();
    engine.on_ready(&listeners);

    assert!(!engine.is_preparing());
    assert_eq!(observer.events(), ["song:a"]);
}

#[test]
fn test_resume_prepare_seeks_on_ready_without_autoplay() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio.clone(), false);
    let listeners = ListenerManager::new();

    engine.prepare_song_paused(song("a"), 42_000).unwrap();
    engine.on_ready(&listeners);

    assert_eq!(
        audio.commands(),
        [
            "prepare(stream:https://music.example/stream/a,false)",
            "seek(42000)"
        ]
    );
}

#[test]
fn test_late_listener_replays_current_song_and_status() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio.clone(), false);
    let mut listeners = ListenerManager::new();

    engine.prepare_song(song("a")).unwrap();
    engine.on_ready(&listeners);
    engine.on_is_playing_changed(true, &listeners);

    // A UI attaching mid-song sees the song and status immediately.
    let late = Arc::new(RecordingObserver::default());
    listeners.add_listener(late.clone(), engine.current_song(), engine.status());

    assert_eq!(late.events(), ["song:a", "state:Playing"]);
}

// ===== Play / Pause Guards =====

#[test]
fn test_play_and_pause_are_idempotent() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio.clone(), false);

    engine.pause();
    assert!(audio.commands().is_empty());

    engine.play();
    engine.play();
    assert_eq!(audio.commands(), ["play"]);

    engine.pause();
    engine.pause();
    assert_eq!(audio.commands(), ["play", "pause"]);
}

#[test]
fn test_stop_notifies_stopped() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio.clone(), false);
    let mut listeners = ListenerManager::new();
    let observer = Arc::new(RecordingObserver::default());
    listeners.add_listener(observer.clone(), None, PlaybackStatus::Idle);

    audio.set_playing(true);
    engine.stop(&listeners);

    assert_eq!(engine.status(), PlaybackStatus::Stopped);
    assert_eq!(observer.events(), ["state:Stopped"]);
}

// ===== Song End =====

#[test]
fn test_song_end_raises_directive() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio, false);

    engine.on_ended();

    let directives = engine.take_directives();
    assert!(matches!(directives.as_slice(), [EngineDirective::SongEnded]));
    assert!(engine.take_directives().is_empty());
}

// ===== Error Recovery =====

fn err(code: EngineErrorCode, message: &str) -> EngineError {
    EngineError {
        code,
        message: message.to_string(),
    }
}

#[test]
fn test_auth_error_stops_and_requests_relogin() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio, false);
    let mut listeners = ListenerManager::new();
    let observer = Arc::new(RecordingObserver::default());
    listeners.add_listener(observer.clone(), None, PlaybackStatus::Idle);

    engine.prepare_song(song("a")).unwrap();
    engine.on_error(err(EngineErrorCode::Unspecified, "HTTP 401"), &listeners);

    // Listeners saw the stop before any recovery was raised.
    assert_eq!(engine.status(), PlaybackStatus::Stopped);
    assert_eq!(observer.events(), ["state:Stopped"]);
    let directives = engine.take_directives();
    assert!(matches!(
        directives.as_slice(),
        [EngineDirective::ReAuthenticate]
    ));
}

#[test]
fn test_network_error_schedules_retry_of_same_song() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio, false);
    let listeners = ListenerManager::new();

    engine.prepare_song(song("a")).unwrap();
    engine.on_error(
        err(EngineErrorCode::NetworkConnectionTimeout, "read timed out"),
        &listeners,
    );

    let directives = engine.take_directives();
    match directives.as_slice() {
        [EngineDirective::RetryAfter { song, delay, token }] => {
            assert_eq!(song.id, "a");
            assert_eq!(*delay, Duration::from_secs(2));
            assert!(engine.token_valid(*token));
        }
        other => panic!("expected RetryAfter, got {other:?}"),
    }
}

#[test]
fn test_other_error_schedules_skip() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio, false);
    let listeners = ListenerManager::new();

    engine.prepare_song(song("a")).unwrap();
    engine.on_error(
        err(EngineErrorCode::Source, "malformed frame"),
        &listeners,
    );

    let directives = engine.take_directives();
    match directives.as_slice() {
        [EngineDirective::SkipAfter { delay, token }] => {
            assert_eq!(*delay, Duration::from_secs(1));
            assert!(engine.token_valid(*token));
        }
        other => panic!("expected SkipAfter, got {other:?}"),
    }
}

#[test]
fn test_recovery_token_goes_stale_after_user_navigates() {
    let audio = ScriptedAudio::default();
    let mut engine = engine_with(audio, false);
    let listeners = ListenerManager::new();

    engine.prepare_song(song("a")).unwrap();
    engine.on_error(
        err(EngineErrorCode::NetworkConnectionFailed, "connect refused"),
        &listeners,
    );
    let directives = engine.take_directives();
    let [EngineDirective::RetryAfter { token, .. }] = directives.as_slice() else {
        panic!("expected RetryAfter, got {directives:?}");
    };

    // User skips to another song before the retry delay elapses.
    engine.prepare_song(song("b")).unwrap();

    assert!(!engine.token_valid(*token));
}

#[test]
fn test_retry_honors_custom_delay() {
    let audio = ScriptedAudio::default();
    let config = PlaybackConfig {
        retry_delay: Duration::from_millis(500),
        ..PlaybackConfig::default()
    };
    let mut engine = PlaybackEngine::new(
        Box::new(audio),
        Box::new(UrlResolver),
        Box::new(Offline(false)),
        config,
    );
    let listeners = ListenerManager::new();

    engine.prepare_song(song("a")).unwrap();
    engine.on_error(
        err(EngineErrorCode::NetworkConnectionFailed, "connect refused"),
        &listeners,
    );

    let directives = engine.take_directives();
    let [EngineDirective::RetryAfter { delay, .. }] = directives.as_slice() else {
        panic!("expected RetryAfter, got {directives:?}");
    };
    assert_eq!(*delay, Duration::from_millis(500));
}
