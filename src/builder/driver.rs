//! Builder for configuring drivers.

use crate::builder::error::BuildError;
use crate::effects::{Driver, DEFAULT_CAPACITY};

/// Fluent, validated driver construction.
///
/// # Example
///
/// ```rust
/// use waterwheel::builder::DriverBuilder;
///
/// let driver = DriverBuilder::new()
///     .capacity(8)
///     .journal(true)
///     .build()
///     .unwrap();
/// assert_eq!(driver.capacity(), 8);
/// ```
pub struct DriverBuilder {
    capacity: usize,
    journaling: bool,
}

impl DriverBuilder {
    /// Start from the defaults: capacity 1, journaling off.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            journaling: false,
        }
    }

    /// Set the event channel capacity.
    ///
    /// Fast effects emit on the loop thread, so a fast effect that emits
    /// more than `capacity` events in one go blocks the loop on itself.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Capture a [`crate::core::Journal`] of every dispatch during runs.
    pub fn journal(mut self, journaling: bool) -> Self {
        self.journaling = journaling;
        self
    }

    /// Build the driver. Rejects a zero capacity.
    pub fn build(self) -> Result<Driver, BuildError> {
        if self.capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }
        Ok(Driver::configured(self.capacity, self.journaling))
    }
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
