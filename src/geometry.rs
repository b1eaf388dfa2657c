//! Shared extrapolation math used by the neighbour linker and the track
//! extractor. Kept in one place because both stages evaluate the exact
//! same three-hit tolerance test against the same two hit triples.

use crate::types::{Hit, TrackerConfig};

/// `true` iff the line from `a` to `b` stays within the configured
/// slope cap relative to the beam axis.
pub fn compatible(a: &Hit, b: &Hit, config: &TrackerConfig) -> bool {
    let dz = (b.z - a.z).abs();
    (b.x - a.x).abs() < config.max_slope_x * dz && (b.y - a.y).abs() < config.max_slope_y * dz
}

/// Linear extrapolation of the line through `start`/`through` evaluated
/// at `target`'s z, plus the residual and scatter against `target`.
/// Returns `None` when the two reference hits share a z (the
/// degenerate-geometry case the core is required to swallow silently).
pub struct Extrapolation {
    pub x_pred: f64,
    pub y_pred: f64,
    pub scatter: f64,
}

pub fn extrapolate(start: &Hit, through: &Hit, target: &Hit) -> Option<Extrapolation> {
    let td_denom = through.z - start.z;
    if td_denom == 0.0 {
        return None;
    }
    let td = 1.0 / td_denom;
    let tx = (through.x - start.x) * td;
    let ty = (through.y - start.y) * td;
    let dz = target.z - start.z;
    let x_pred = start.x + tx * dz;
    let y_pred = start.y + ty * dz;

    let denom = target.z - through.z;
    if denom == 0.0 {
        return None;
    }
    let dx = x_pred - target.x;
    let dy = y_pred - target.y;
    let scatter = (dx * dx + dy * dy) / (denom * denom);

    Some(Extrapolation {
        x_pred,
        y_pred,
        scatter,
    })
}

/// The full three-hit tolerance test: residuals in x/y plus scatter,
/// each against the configured caps.
pub fn within_tolerance(start: &Hit, through: &Hit, target: &Hit, config: &TrackerConfig) -> bool {
    match extrapolate(start, through, target) {
        None => false,
        Some(e) => {
            (e.x_pred - target.x).abs() < config.max_tolerance_x
                && (e.y_pred - target.y).abs() < config.max_tolerance_y
                && e.scatter < config.max_scatter
        }
    }
}

/// χ² contribution of a three-hit triple, with the zero-guard: a
/// perfectly collinear triple would otherwise contribute exactly zero
/// and make later `1/chi2` ranking divide by zero.
pub fn chi2_of(start: &Hit, through: &Hit, target: &Hit) -> f64 {
    let scatter = extrapolate(start, through, target)
        .map(|e| e.scatter)
        .unwrap_or(0.0);
    if scatter == 0.0 {
        f64::MIN_POSITIVE
    } else {
        scatter
    }
}
