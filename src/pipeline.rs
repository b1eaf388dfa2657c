//! Orchestration entry point. Validates the event, runs the six stages
//! in order, and instruments each with a `tracing` span. Contributes no
//! tracking semantics of its own: the stage functions stay pure data
//! transformations, unit-testable in isolation.

use tracing::info_span;

use crate::error::TrackerError;
use crate::evolve::evolve_state;
use crate::extract::extract_tracks;
use crate::filter::filter_by_length;
use crate::linker::link_neighbours;
use crate::resolve::resolve_ghosts;
use crate::segment::build_segments;
use crate::types::{Event, Track, TrackerConfig};

/// Reconstructs tracks for one event. Returns `Ok(vec![])`, not an
/// error, for an event with fewer than 3 sensors or no hits at all.
pub fn reconstruct_tracks(
    event: &Event,
    config: &TrackerConfig,
) -> Result<Vec<Track>, TrackerError> {
    let _span = info_span!(
        "reconstruct_tracks",
        sensors = event.number_of_sensors(),
        hits = event.number_of_hits()
    )
    .entered();

    event.validate()?;

    if event.number_of_sensors() < 3 || event.number_of_hits() == 0 {
        return Ok(Vec::new());
    }

    let mut index = {
        let _s = info_span!("segment_builder").entered();
        build_segments(event, config)
    };

    {
        let _s = info_span!("neighbour_linker").entered();
        link_neighbours(&mut index, config);
    }

    let rounds = {
        let _s = info_span!("state_evolver").entered();
        evolve_state(&mut index)
    };
    tracing::debug!(rounds, "state evolution converged");

    let candidates = {
        let span = info_span!("track_extractor", seeds_examined = tracing::field::Empty);
        let _s = span.enter();
        let (tracks, seeds_examined) = extract_tracks(&index);
        span.record("seeds_examined", seeds_examined);
        tracing::debug!(candidates = tracks.len(), "back-walk completed");
        tracks
    };

    let survivors = {
        let _s = info_span!("length_filter", before = candidates.len()).entered();
        let tracks = filter_by_length(candidates, config);
        tracing::debug!(after = tracks.len(), "length filter applied");
        tracks
    };

    let admitted = {
        let _s = info_span!("ghost_resolver", before = survivors.len()).entered();
        let tracks = resolve_ghosts(survivors, config);
        tracing::debug!(after = tracks.len(), "ghost/clone resolution applied");
        tracks
    };

    Ok(admitted)
}
