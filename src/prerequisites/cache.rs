//! On-disk record of the last successful prerequisite check

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How long a passing check is trusted.
pub const CACHE_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteCache {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub prerequisites_passed: bool,
}

impl PrerequisiteCache {
    pub fn passed_at(now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now.timestamp_millis(),
            prerequisites_passed: true,
        }
    }

    /// Created no later than `now` and less than a week before it.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let Some(created) = DateTime::<Utc>::from_timestamp_millis(self.timestamp) else {
            return false;
        };
        created <= now && now - created < Duration::days(CACHE_TTL_DAYS)
    }

    /// True when this record lets the tool checks be skipped.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.prerequisites_passed && self.is_fresh(now)
    }

    /// Missing, unreadable and corrupt files all read as "no cache".
    pub fn load(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
