use std::collections::HashSet;

use crate::error::TrackerError;

/// A single measured point. Coordinates are real-valued; identity and
/// hashing are by `id` alone everywhere the core compares hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub hit_number: u32,
    pub sensor_number: u32,
}

/// A detector plane perpendicular to the beam axis, holding the hits
/// assigned to it. Sensors are ordered by non-decreasing `z`.
#[derive(Debug, Clone)]
pub struct Sensor {
    pub sensor_number: u32,
    pub z: f64,
    pub hits: Vec<Hit>,
}

/// A read-only bundle of the sensor sequence for one event. Hits live
/// inside their sensor; [`Event::all_hits`] gives the flat view the
/// external interface describes.
#[derive(Debug, Clone)]
pub struct Event {
    pub sensors: Vec<Sensor>,
}

impl Event {
    pub fn number_of_sensors(&self) -> usize {
        self.sensors.len()
    }

    pub fn number_of_hits(&self) -> usize {
        self.sensors.iter().map(|s| s.hits.len()).sum()
    }

    pub fn all_hits(&self) -> impl Iterator<Item = &Hit> {
        self.sensors.iter().flat_map(|s| s.hits.iter())
    }

    /// Re-validates the two invariants the core relies on but cannot
    /// itself recover from: every hit's claimed sensor matches the
    /// sensor it is actually stored under, and hit ids are unique
    /// within the event. Cheap linear pass, not a redesign of ingestion.
    pub fn validate(&self) -> Result<(), TrackerError> {
        let mut seen = HashSet::with_capacity(self.number_of_hits());
        for sensor in &self.sensors {
            for hit in &sensor.hits {
                if hit.sensor_number != sensor.sensor_number {
                    return Err(TrackerError::SensorIndexMismatch {
                        hit_id: hit.id,
                        claimed: hit.sensor_number,
                        found: sensor.sensor_number,
                    });
                }
                if !seen.insert(hit.id) {
                    return Err(TrackerError::DuplicateHitId(hit.id));
                }
            }
        }
        Ok(())
    }
}

/// A reconstructed track: an ordered hit chain plus the bookkeeping the
/// extractor and ghost resolver need.
#[derive(Debug, Clone)]
pub struct Track {
    pub hits: Vec<Hit>,
    pub length: u32,
    pub chi2: f64,
    /// Ranking key used to select among competing back-walk completions
    /// and, downstream, among competing seeds. See `TrackerConfig` and
    /// the Track Extractor for how it is populated.
    pub new_x: f64,
}

/// Construction-time tunables. No global state, no environment lookups:
/// every pipeline function that needs a knob takes this by reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    pub max_slope_x: f64,
    pub max_slope_y: f64,
    pub max_tolerance_x: f64,
    pub max_tolerance_y: f64,
    pub max_scatter: f64,
    pub allowed_skip_sensors: u32,
    pub min_track_length: u32,
    pub max_shared_hit_ratio: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            max_slope_x: 0.7,
            max_slope_y: 0.7,
            max_tolerance_x: 0.4,
            max_tolerance_y: 0.4,
            max_scatter: 0.4,
            allowed_skip_sensors: 1,
            min_track_length: 3,
            max_shared_hit_ratio: 0.3,
        }
    }
}
