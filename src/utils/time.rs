//! Wall-clock helpers.

use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

/// Current UNIX time in whole seconds
pub fn unix_now() -> Result<u64, SystemTimeError> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}
