//! Construction parameters and their limits.

use crate::error::MapError;

/// Number of slots a map starts with when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 4;

/// Ratio of entries to slots at which the table doubles.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Smallest accepted load factor. Lower values would spend a doubling per
/// handful of entries and reach the capacity limit after a few dozen puts.
pub const MIN_LOAD_FACTOR: f32 = 0.1;

/// Growth stops here; past this point chains simply get longer.
pub const MAX_CAPACITY: usize = 1 << 30;

/// Initial capacity, load factor and growth limit for a
/// [`ChainedHashMap`](crate::ChainedHashMap).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub initial_capacity: usize,
    pub load_factor: f32,
    /// Capacity at which doubling stops. At most [`MAX_CAPACITY`].
    pub max_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            max_capacity: MAX_CAPACITY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Check every parameter; a map is only ever built from a validated config.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.initial_capacity == 0 {
            return Err(MapError::InvalidCapacity(self.initial_capacity));
        }
        if self.max_capacity > MAX_CAPACITY {
            return Err(MapError::CapacityOverflow {
                requested: self.max_capacity,
                max: MAX_CAPACITY,
            });
        }
        if self.initial_capacity > self.max_capacity {
            return Err(MapError::CapacityOverflow {
                requested: self.initial_capacity,
                max: self.max_capacity,
            });
        }
        if !self.load_factor.is_finite() || self.load_factor < MIN_LOAD_FACTOR {
            return Err(MapError::InvalidLoadFactor(self.load_factor));
        }
        Ok(())
    }

    /// Force the parameters into range instead of failing. Used by the
    /// infallible constructors.
    pub(crate) fn clamped(self) -> Self {
        let load_factor = if self.load_factor.is_finite() && self.load_factor > 0.0 {
            self.load_factor.max(MIN_LOAD_FACTOR)
        } else {
            DEFAULT_LOAD_FACTOR
        };
        let max_capacity = self.max_capacity.clamp(1, MAX_CAPACITY);
        Self {
            initial_capacity: self.initial_capacity.clamp(1, max_capacity),
            load_factor,
            max_capacity,
        }
    }
}
