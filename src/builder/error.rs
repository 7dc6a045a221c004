//! Errors from driver construction.

/// Configuration rejected by [`DriverBuilder::build`](crate::builder::DriverBuilder::build).
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The event channel must buffer at least one event.
    #[error("event channel capacity must be at least 1")]
    ZeroCapacity,
}
