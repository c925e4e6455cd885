use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Lookback window shared by the log and metric queries of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CollectionWindow {
    /// `None` when `days` reaches past the representable date range.
    pub fn last_days(days: u32, now: DateTime<Utc>) -> Option<Self> {
        let span = TimeDelta::try_days(i64::from(days))?;
        Some(Self {
            start: now.checked_sub_signed(span)?,
            end: now,
        })
    }

    /// Inclusive at both ends.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}
