//! Stage 2: Neighbour Linker. For every segment, records which earlier
//! segments share its left endpoint and pass the three-hit extrapolation
//! tolerance.
//!
//! A predecessor's end can coincide with a segment's start by arriving
//! either two planes earlier (a direct step) or four planes earlier (a
//! step that itself skipped one missing plane), so both source sensors
//! are scanned.

use crate::geometry::within_tolerance;
use crate::segment::{SegRef, SegmentIndex};
use crate::types::{Hit, TrackerConfig};

fn same_point(a: &Hit, b: &Hit) -> bool {
    a.x == b.x && a.y == b.y && a.z == b.z
}

/// Scans every bucket of `doublets[source]`, admitting a predecessor
/// when its right endpoint coincides with `start` and the three-hit
/// extrapolation against `end` passes. Buckets share a right endpoint,
/// so the shared-point test is uniform across a bucket: check the first
/// element and skip the whole bucket on a mismatch.
fn scan_source(
    index: &SegmentIndex,
    source: usize,
    start: &Hit,
    end: &Hit,
    config: &TrackerConfig,
    out: &mut Vec<SegRef>,
) {
    for (bucket_l, pred_bucket) in index.doublets[source].iter().enumerate() {
        let shares_point = match pred_bucket.first() {
            Some(first) => same_point(&first.end, start),
            None => false,
        };
        if !shares_point {
            continue;
        }

        for (slot_l, l) in pred_bucket.iter().enumerate() {
            if within_tolerance(&l.start, &l.end, end, config) {
                out.push(SegRef {
                    sensor_index: source,
                    bucket: bucket_l,
                    slot: slot_l,
                });
            }
        }
    }
}

/// Populates `left_neighbours` for every segment in sensors `s >= 2`
/// (addressable sensor index, i.e. `doublets` index `s >= 2`).
pub fn link_neighbours(index: &mut SegmentIndex, config: &TrackerConfig) {
    let n = index.sensor_count_addressable();
    if n < 3 {
        return;
    }

    // First pass: compute every segment's new left_neighbours using
    // only immutable reads, so there is no aliasing between the
    // segment being linked and the predecessor sensors' buckets.
    let mut computed: Vec<(usize, usize, usize, Vec<SegRef>)> = Vec::new();

    for s in 2..n {
        for (bucket_d, bucket) in index.doublets[s].iter().enumerate() {
            for (slot_d, d) in bucket.iter().enumerate() {
                let mut left_neighbours = Vec::new();

                scan_source(index, s - 2, &d.start, &d.end, config, &mut left_neighbours);
                if s >= 4 {
                    scan_source(index, s - 4, &d.start, &d.end, config, &mut left_neighbours);
                }

                if !left_neighbours.is_empty() {
                    computed.push((s, bucket_d, slot_d, left_neighbours));
                }
            }
        }
    }

    for (s, bucket_d, slot_d, left_neighbours) in computed {
        index.doublets[s][bucket_d][slot_d].left_neighbours = left_neighbours;
    }
}
