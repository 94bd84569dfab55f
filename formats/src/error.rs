//! Error module
//!

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CzmlError {
    #[error("Malformed sample #{index}: need 3 or 4 values, got {len}")]
    MalformedSample { index: usize, len: usize },
    #[error("Empty trajectory")]
    EmptyTrajectory,
    #[error("Bad interval: {start} is not before {end}")]
    BadInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("Offsets must not decrease: sample #{index} at {offset}s follows {previous}s")]
    NonMonotonic {
        index: usize,
        offset: f64,
        previous: f64,
    },
    #[error("Offset {0}s can not be turned into a timestamp")]
    BadOffset(f64),
    #[error("No entities supplied")]
    NoEntities,
    #[error("Entity #{0} has no id")]
    MissingId(usize),
    #[error("Duplicate entity id {0}")]
    DuplicateId(String),
    #[error("Can not serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}
