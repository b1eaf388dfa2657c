//! Manual timing harness for `reconstruct_tracks`, in the style of the
//! rest of this crate's benchmark drivers: build a synthetic event,
//! time a handful of repeated runs, print a JSON summary.

use std::time::Instant;

use ca_track_finder::{reconstruct_tracks, Event, Hit, Sensor, TrackerConfig};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Each logical plane sits two array positions apart (the plane, then
/// an empty placeholder), matching the Segment Builder's `s`, `s+2`
/// addressing for a no-skip chain.
fn make_event(sensors: u32, hits_per_sensor: u32, seed: u64) -> Event {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut next_id = 1u32;

    let tracks: u32 = hits_per_sensor;
    let mut planes = Vec::new();

    for s in 0..sensors {
        let pos = s * 2;
        let z = pos as f64 * 10.0;
        let mut hits = Vec::with_capacity(hits_per_sensor as usize);
        for t in 0..tracks {
            let jitter = rng.gen_range(-0.05..0.05);
            hits.push(Hit {
                id: next_id,
                x: t as f64 + jitter,
                y: t as f64 + jitter,
                z,
                hit_number: t,
                sensor_number: pos,
            });
            next_id += 1;
        }
        planes.push(Sensor {
            sensor_number: pos,
            z,
            hits,
        });
        planes.push(Sensor {
            sensor_number: pos + 1,
            z: (pos + 1) as f64 * 10.0,
            hits: vec![],
        });
    }

    Event { sensors: planes }
}

fn main() {
    let sensors = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(8u32);
    let hits_per_sensor = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(40u32);
    let repeats = std::env::args()
        .nth(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5usize);

    let event = make_event(sensors, hits_per_sensor, 7);
    let config = TrackerConfig::default();

    let mut timings_ms = Vec::with_capacity(repeats);
    let mut last_count = 0;
    for _ in 0..repeats {
        let t0 = Instant::now();
        let tracks = reconstruct_tracks(&event, &config).expect("well-formed synthetic event");
        timings_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
        last_count = tracks.len();
    }

    let summary = serde_json::json!({
        "sensors": sensors,
        "hits_per_sensor": hits_per_sensor,
        "repeats": repeats,
        "timings_ms": timings_ms,
        "tracks_found": last_count,
    });
    println!("{}", summary);
}
