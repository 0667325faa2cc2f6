use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Get the current time in seconds since the UNIX epoch
pub fn current_time_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Get a timestamp in seconds since the UNIX epoch
pub fn timestamp_secs() -> u64 {
    current_time_secs() as u64
}

/// Time elapsed since a UNIX timestamp in seconds, zero if it lies in the future.
pub fn age_of(timestamp: u64) -> Duration {
    Duration::from_secs(timestamp_secs().saturating_sub(timestamp))
}
