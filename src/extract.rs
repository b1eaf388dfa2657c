//! Stage 4: Track Extractor. Walks back from every high-state segment,
//! enumerating compatible extensions, and keeps the best completion per
//! seed.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::geometry::chi2_of;
use crate::segment::{SegRef, SegmentIndex};
use crate::types::{Hit, Track};

/// Persistent hit-chain node. Branches during back-walk share the
/// common prefix instead of deep-copying it; only a completed chain
/// pays the cost of materializing its `Vec<Hit>`.
struct Node {
    hit: Hit,
    prev: Option<Rc<Node>>,
}

fn materialize(tail: &Rc<Node>) -> Vec<Hit> {
    let mut out = Vec::new();
    let mut cur = Some(Rc::clone(tail));
    while let Some(node) = cur {
        out.push(node.hit);
        cur = node.prev.clone();
    }
    out.reverse();
    out
}

/// One pending step of the back-walk: the segment to extend from (its
/// `end`/`state`/`left_neighbours`, already resolved), the hit chain
/// accumulated so far, and the chain's running length and chi2.
struct Frame {
    end: Hit,
    state: u32,
    left_neighbours: Vec<SegRef>,
    tail: Rc<Node>,
    chi2: f64,
    length: u32,
}

/// Orders completions by the key the source's sort-by-`new_x` reduces
/// to on a first pass, when every candidate's `new_x` is still zero:
/// longer chains first, then smaller accumulated chi2.
fn better(a: &Track, b: &Track) -> Ordering {
    b.length
        .cmp(&a.length)
        .then(a.chi2.partial_cmp(&b.chi2).unwrap_or(Ordering::Equal))
}

/// Returns the extracted tracks plus the number of seeds walked (every
/// segment with `state > 1` that was not already claimed), for callers
/// that want to report it alongside the other per-stage counts.
pub fn extract_tracks(index: &SegmentIndex) -> (Vec<Track>, usize) {
    let mut results = Vec::new();
    let mut seeds_examined = 0usize;
    let n = index.sensor_count_addressable();

    for s in (0..n).rev() {
        for bucket_idx in 0..index.doublets[s].len() {
            for slot_idx in 0..index.doublets[s][bucket_idx].len() {
                let seed = &index.doublets[s][bucket_idx][slot_idx];
                if seed.state <= 1 || seed.used {
                    continue;
                }
                seeds_examined += 1;

                let tail = Rc::new(Node {
                    hit: seed.end,
                    prev: None,
                });
                let tail = Rc::new(Node {
                    hit: seed.start,
                    prev: Some(tail),
                });

                let root = Frame {
                    end: seed.end,
                    state: seed.state,
                    left_neighbours: seed.left_neighbours.clone(),
                    tail,
                    chi2: 0.0,
                    length: 2,
                };

                if let Some(track) = back_walk(index, root) {
                    results.push(track);
                }
            }
        }
    }

    (results, seeds_examined)
}

fn back_walk(index: &SegmentIndex, root: Frame) -> Option<Track> {
    let mut stack = vec![root];
    let mut completions: Vec<Track> = Vec::new();

    while let Some(frame) = stack.pop() {
        let mut extended = false;

        // Pushed in reverse so the LIFO stack still explores neighbours
        // left-to-right: the first neighbour in `left_neighbours` must
        // reach a completion before the second is tried, so that an
        // exact (length, chi2) tie breaks toward the same side the
        // left-to-right recursive walk would pick.
        for r in frame.left_neighbours.iter().rev() {
            let l = index.get(*r);
            if l.used || l.state >= frame.state {
                continue;
            }

            let term = chi2_of(&l.start, &l.end, &frame.end);
            let new_tail = Rc::new(Node {
                hit: l.start,
                prev: Some(Rc::clone(&frame.tail)),
            });

            stack.push(Frame {
                end: l.end,
                state: l.state,
                left_neighbours: l.left_neighbours.clone(),
                tail: new_tail,
                chi2: frame.chi2 + term,
                length: frame.length + 1,
            });
            extended = true;
        }

        if !extended {
            completions.push(Track {
                hits: materialize(&frame.tail),
                length: frame.length,
                chi2: frame.chi2,
                new_x: 0.0,
            });
        }
    }

    completions.into_iter().min_by(better)
}
