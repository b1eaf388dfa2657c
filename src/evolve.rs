//! Stage 3: State Evolver. Raises segment `state` in synchronous
//! lockstep rounds until a full round produces no change.
//!
//! The scan sweep and the commit sweep must not be fused: a segment's
//! neighbours are read as they stood at the *start* of the round, never
//! as updated mid-round by this same round's commits. A snapshot of
//! every segment's `state`, taken before the scan sweep, is the natural
//! way to express that barrier without unsafe aliasing.

use crate::segment::SegmentIndex;

pub fn evolve_state(index: &mut SegmentIndex) -> u32 {
    let mut rounds = 0;

    loop {
        let snapshot: Vec<Vec<Vec<u32>>> = index
            .doublets
            .iter()
            .map(|sensor| {
                sensor
                    .iter()
                    .map(|bucket| bucket.iter().map(|seg| seg.state).collect())
                    .collect()
            })
            .collect();

        let mut changes = 0u32;
        let n = index.sensor_count_addressable();

        for s in 2..n {
            for bucket_d in 0..index.doublets[s].len() {
                for slot_d in 0..index.doublets[s][bucket_d].len() {
                    let own_state = snapshot[s][bucket_d][slot_d];
                    let refs = index.doublets[s][bucket_d][slot_d].left_neighbours.clone();

                    let mut incremented = false;
                    for r in refs {
                        let neighbour_state = snapshot[r.sensor_index][r.bucket][r.slot];
                        if neighbour_state == own_state {
                            incremented = true;
                            break;
                        }
                    }

                    if incremented {
                        index.doublets[s][bucket_d][slot_d].new_state = own_state + 1;
                        changes += 1;
                    } else {
                        index.doublets[s][bucket_d][slot_d].new_state = own_state;
                    }
                }
            }
        }

        for sensor in index.doublets.iter_mut() {
            for bucket in sensor.iter_mut() {
                for seg in bucket.iter_mut() {
                    seg.state = seg.new_state;
                }
            }
        }

        rounds += 1;
        if changes == 0 {
            break;
        }
    }

    rounds
}
