//! Default values shared by the config structs.

use crate::constants;

pub const DEFAULT_CACHE_TTL_SECS: u64 = constants::RESULT_CACHE_TTL_SECS;
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = constants::RESULT_CACHE_MAX_ENTRIES;
/// Results slower than this multiple of the latency target are not cached.
pub const DEFAULT_CACHE_LATENCY_FACTOR: f64 = 2.0;
pub const DEFAULT_LATENCY_TARGET_MS: f64 = constants::LATENCY_TARGET_MS;
pub const DEFAULT_HISTORY_RETENTION_DAYS: i64 = constants::HISTORY_RETENTION_DAYS;
