//! Stage 5: Length Filter. Discards chains shorter than the configured
//! minimum.

use crate::types::{Track, TrackerConfig};

pub fn filter_by_length(tracks: Vec<Track>, config: &TrackerConfig) -> Vec<Track> {
    tracks
        .into_iter()
        .filter(|t| t.length >= config.min_track_length)
        .collect()
}
