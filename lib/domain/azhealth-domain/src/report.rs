use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::health::HealthRecord;
use crate::issue::Issue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub health_records: Vec<HealthRecord>,
    pub issues: Vec<Issue>,
    /// Set when collection was interrupted before every resource was visited.
    #[serde(default)]
    pub partial: bool,
}

impl Report {
    pub fn new(health_records: Vec<HealthRecord>, issues: Vec<Issue>) -> Self {
        Self {
            generated_at: Utc::now(),
            health_records,
            issues,
            partial: false,
        }
    }

    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Issues naming a resource that has no row in the health table.
    pub fn orphan_issues(&self) -> Vec<&Issue> {
        let known: HashSet<&str> = self
            .health_records
            .iter()
            .map(|record| record.resource_name.as_str())
            .collect();
        self.issues
            .iter()
            .filter(|issue| !known.contains(issue.resource_name.as_str()))
            .collect()
    }
}
