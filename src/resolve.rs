//! Stage 6: Ghost/Clone Resolver. Orders candidates by length then
//! smoothness and greedily admits those that do not substantially
//! overlap previously admitted hits.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::types::{Track, TrackerConfig};

pub fn resolve_ghosts(mut tracks: Vec<Track>, config: &TrackerConfig) -> Vec<Track> {
    tracks.sort_by(|a, b| {
        b.length.cmp(&a.length).then_with(|| {
            a.chi2
                .partial_cmp(&b.chi2)
                .unwrap_or(Ordering::Equal)
        })
    });

    let mut used_hit_ids: HashSet<u32> = HashSet::new();
    let mut admitted = Vec::new();

    for track in tracks {
        let overlap = track
            .hits
            .iter()
            .filter(|h| used_hit_ids.contains(&h.id))
            .count();
        let ratio = overlap as f64 / track.length as f64;

        if ratio < config.max_shared_hit_ratio {
            for h in &track.hits {
                used_hit_ids.insert(h.id);
            }
            admitted.push(track);
        }
    }

    admitted
}
