//! System clock adapter

use chrono::{DateTime, FixedOffset, Local};
use statuscheck_application::ports::Clock;

/// System clock implementation using the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use statuscheck_domain::{CLIENT_NAME_PREFIX, StatusCheckCreate};

    #[test]
    fn test_system_clock() {
        let clock = SystemClock::new();
        let now = clock.now();
        assert!(now.timestamp() > 0);
    }

    #[test]
    fn test_system_clock_uses_local_offset() {
        let now = SystemClock::new().now();
        let local = Local.offset_from_utc_datetime(&now.naive_utc());
        assert_eq!(*now.offset(), local);
    }

    #[test]
    fn test_client_name_from_system_clock() {
        let now = SystemClock::new().now();
        let payload = StatusCheckCreate::at(&now);
        assert_eq!(
            payload.client_name,
            format!("{CLIENT_NAME_PREFIX}{}", now.naive_local().format("%Y%m%d%H%M%S"))
        );
    }
}
