//! Time helpers.

use chrono::{DateTime, Utc};

/// Current time as Unix-epoch seconds.
#[must_use]
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Current time as an RFC 3339 `DateTime<Utc>`.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
