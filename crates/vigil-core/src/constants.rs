/// Vigil engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result cache entry time-to-live in seconds.
pub const RESULT_CACHE_TTL_SECS: u64 = 300;

/// Maximum number of entries held by the result cache.
pub const RESULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Alert history retention horizon in days.
pub const HISTORY_RETENTION_DAYS: i64 = 30;

/// Interactive point-of-care latency target in milliseconds.
pub const LATENCY_TARGET_MS: f64 = 100.0;

/// Maximum priority score an alert can carry.
pub const MAX_PRIORITY_SCORE: u32 = 100;
