//! Shuffle and repeat-mode control

use crate::listeners::ListenerManager;
use crate::queue::Queue;
use crate::types::RepeatMode;
use tracing::debug;

/// Owns the repeat mode and drives queue shuffle state
///
/// Every shuffle change goes out as a queue-changed notification so
/// observers always see the new play order.
#[derive(Debug, Default)]
pub struct ShuffleRepeatController {
    repeat_mode: RepeatMode,
}

impl ShuffleRepeatController {
    /// Create a controller with repeat off
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller with an initial repeat mode
    pub fn with_repeat(repeat_mode: RepeatMode) -> Self {
        Self { repeat_mode }
    }

    /// Toggle shuffle on or off
    ///
    /// Returns the new shuffle state.
    pub fn toggle_shuffle(&mut self, queue: &mut Queue, listeners: &ListenerManager) -> bool {
        if queue.is_shuffled() {
            queue.unshuffle();
            debug!("shuffle disabled - restored original order");
        } else {
            queue.shuffle();
            debug!("shuffle enabled - created shuffled order");
        }

        listeners.notify_queue_changed(queue.contents());
        queue.is_shuffled()
    }

    /// Enable shuffle if not already shuffled
    ///
    /// Idempotent; used during session restore.
    pub fn enable_shuffle(&mut self, queue: &mut Queue, listeners: &ListenerManager) {
        if !queue.is_shuffled() {
            queue.shuffle();
            listeners.notify_queue_changed(queue.contents());
        }
    }

    /// Disable shuffle if currently shuffled
    ///
    /// Idempotent; used during session restore.
    pub fn disable_shuffle(&mut self, queue: &mut Queue, listeners: &ListenerManager) {
        if queue.is_shuffled() {
            queue.unshuffle();
            listeners.notify_queue_changed(queue.contents());
        }
    }

    /// Rotate the repeat mode: Off -> All -> One -> Off
    ///
    /// Returns the new mode. Purely local state, no queue interaction.
    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.repeat_mode = match self.repeat_mode {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        };
        debug!(mode = ?self.repeat_mode, "repeat mode changed");
        self.repeat_mode
    }

    /// Set the repeat mode directly (used during session restore)
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    /// Current repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }
}
