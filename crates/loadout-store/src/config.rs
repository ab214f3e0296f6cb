//! Store configuration.

use chrono::Duration;

/// Default record time-to-live: two hours.
const DEFAULT_TTL_HOURS: i64 = 2;

/// Default capacity bound on the number of stored records.
const DEFAULT_MAX_RECORDS: usize = 100;

/// Default period between background expiry sweeps: thirty minutes.
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 30 * 60;

/// Tunable parameters of a record store, fixed at initialization.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long a record stays loadable after it is saved.
    pub ttl: Duration,
    /// Hard cap on stored records; oldest-expiring records are evicted
    /// beyond it.
    pub max_records: usize,
    /// Period between background expiry sweeps, consumed by the scheduler
    /// that drives `tick`.
    pub cleanup_interval: std::time::Duration,
}

impl StoreConfig {
    /// Override the record time-to-live.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Override the record capacity bound.
    #[must_use]
    pub const fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Override the background sweep period.
    #[must_use]
    pub const fn with_cleanup_interval(mut self, interval: std::time::Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
            max_records: DEFAULT_MAX_RECORDS,
            cleanup_interval: std::time::Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
        }
    }
}
