//! Stage 1: Segment Builder. Produces the three-level segment index
//! `doublets[sensor_index][bucket][slot]` that every later stage
//! addresses through `(sensor_index, SegRef)` pairs.

use crate::geometry::compatible;
use crate::types::{Event, Hit, TrackerConfig};

/// A two-hit doublet. Mutable across stages 1-3, read-only from stage 4
/// onward.
#[derive(Debug, Clone)]
pub struct Segment {
    pub start: Hit,
    pub end: Hit,
    pub state: u32,
    pub new_state: u32,
    pub used: bool,
    pub left_neighbours: Vec<SegRef>,
}

impl Segment {
    fn new(start: Hit, end: Hit) -> Self {
        Segment {
            start,
            end,
            state: 1,
            new_state: 1,
            used: false,
            left_neighbours: Vec::new(),
        }
    }
}

/// A handle into `doublets[sensor_index][bucket][slot]`. Carries its own
/// `sensor_index` rather than leaving it implicit: a predecessor may sit
/// either two or four planes before the segment holding the reference
/// (a direct step or a skip over one missing plane), so the distance
/// cannot be inferred from context alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegRef {
    pub sensor_index: usize,
    pub bucket: usize,
    pub slot: usize,
}

#[derive(Debug, Clone)]
pub struct SegmentIndex {
    pub doublets: Vec<Vec<Vec<Segment>>>,
}

impl SegmentIndex {
    pub fn get(&self, r: SegRef) -> &Segment {
        &self.doublets[r.sensor_index][r.bucket][r.slot]
    }

    pub fn get_mut(&mut self, r: SegRef) -> &mut Segment {
        &mut self.doublets[r.sensor_index][r.bucket][r.slot]
    }

    pub fn sensor_count_addressable(&self) -> usize {
        self.doublets.len()
    }
}

/// Builds doublets between every compatible hit pair on sensors `s` and
/// `s+2` (and, when skips are allowed, `s+4`), for every `s` in
/// `[0, N-2)`. Buckets are grouped by right-endpoint position: all
/// `s+2` buckets first, then all `s+4` buckets.
pub fn build_segments(event: &Event, config: &TrackerConfig) -> SegmentIndex {
    let n = event.number_of_sensors();
    let mut doublets = Vec::new();

    if n < 3 {
        return SegmentIndex { doublets };
    }

    for s in 0..n - 2 {
        let mut buckets: Vec<Vec<Segment>> = Vec::new();
        let start_hits = &event.sensors[s].hits;

        let step_hits = &event.sensors[s + 2].hits;
        for end_hit in step_hits {
            let bucket = start_hits
                .iter()
                .filter(|h| compatible(h, end_hit, config))
                .map(|h| Segment::new(*h, *end_hit))
                .collect();
            buckets.push(bucket);
        }

        if config.allowed_skip_sensors >= 1 && s + 4 < n {
            let skip_hits = &event.sensors[s + 4].hits;
            for end_hit in skip_hits {
                let bucket = start_hits
                    .iter()
                    .filter(|h| compatible(h, end_hit, config))
                    .map(|h| Segment::new(*h, *end_hit))
                    .collect();
                buckets.push(bucket);
            }
        }

        doublets.push(buckets);
    }

    SegmentIndex { doublets }
}
