//! Shuffle algorithm for queue randomization
//!
//! Fisher-Yates via `rand::seq::SliceRandom`

use crate::types::Song;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Shuffle songs in place
///
/// Each song has equal probability of appearing at any position.
pub(crate) fn shuffle_songs(songs: &mut [Song]) {
    let mut rng = thread_rng();
    songs.shuffle(&mut rng);
}

/// Shuffled copy of `playlist` with every song except `current` (by id)
///
/// Used when shuffle is engaged mid-playback: the audible song is pinned
/// to the front of the new queue and the remainder is permuted.
pub(crate) fn shuffled_remainder(playlist: &[Song], current: &Song) -> Vec<Song> {
    let mut remainder: Vec<Song> = playlist
        .iter()
        .filter(|s| s.id != current.id)
        .cloned()
        .collect();
    shuffle_songs(&mut remainder);
    remainder
}
