//! Error taxonomy for map construction.
//!
//! Lookups never fail: a missing key is `None`. The only fallible surface is
//! building a map from a [`Config`](crate::Config).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("initial capacity must be positive, got {0}")]
    InvalidCapacity(usize),
    #[error("load factor must be finite and at least 0.1, got {0}")]
    InvalidLoadFactor(f32),
    #[error("requested capacity {requested} exceeds maximum {max}")]
    CapacityOverflow { requested: usize, max: usize },
}
