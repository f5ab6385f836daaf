//! Clock port for time-related operations

use chrono::{DateTime, FixedOffset};

/// Port for getting the current time.
///
/// Client names of created status checks derive from it, so tests can pin
/// them with a fixed implementation.
pub trait Clock: Send + Sync {
    /// Returns the current time with the host's local UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}
