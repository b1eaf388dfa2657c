use thiserror::Error;

/// Preconditions the core relies on internally and re-validates at the
/// public entry point. Violating either would silently corrupt the
/// segment index or the ghost-resolution hit-ownership bookkeeping
/// rather than panicking loudly, so they are checked up front instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error("hit {hit_id} claims sensor_number {claimed} but was stored under sensor index {found}")]
    SensorIndexMismatch {
        hit_id: u32,
        claimed: u32,
        found: u32,
    },

    #[error("duplicate hit id {0} in event")]
    DuplicateHitId(u32),
}
