//! Shared entity pieces. Pure data structures returned by the API.
//!
//! No transport types here; services decode into these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public projection of a platform user, embedded in assignment and submission records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// Converts a server epoch-seconds timestamp into UTC. Out-of-range values yield `None`.
pub fn epoch_to_utc(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
}

/// Formats an epoch timestamp the way the grade export does (`%Y-%m-%d %H:%M`).
pub fn format_epoch(secs: i64) -> String {
    epoch_to_utc(secs)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| secs.to_string())
}
