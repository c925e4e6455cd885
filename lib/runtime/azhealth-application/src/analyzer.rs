//! Fixed rule set turning collected data into issues.
//!
//! Rules run independently in a fixed order (health, error logs, metric
//! spikes) and the output keeps that order. Nothing is deduplicated.

use azhealth_domain::{HealthRecord, Issue, IssueType, LogEntry, MetricSeries, Severity};

const ERROR_LEVEL: &str = "Error";
const SPIKE_FACTOR: f64 = 2.0;

const HEALTH_ACTION: &str = "Check Azure Service Health and the resource's activity log, then restart or redeploy the resource if the state persists.";
const ERROR_ACTION: &str =
    "Review the error details in the activity log and correct the failing operation or configuration.";
const PERFORMANCE_ACTION: &str =
    "Review the metric trend and consider scaling the resource or tuning the workload.";

pub fn analyze(
    health: &[HealthRecord],
    logs: &[LogEntry],
    metrics: &[MetricSeries],
) -> Vec<Issue> {
    let mut issues = health_issues(health);
    issues.extend(error_log_issues(logs));
    issues.extend(metric_spike_issues(metrics));
    issues
}

pub fn health_issues(health: &[HealthRecord]) -> Vec<Issue> {
    health
        .iter()
        .filter(|record| !record.availability_state.is_available())
        .map(|record| Issue {
            resource_name: record.resource_name.clone(),
            issue_type: IssueType::Health,
            severity: Severity::High,
            description: format!("Resource is in {} state", record.availability_state),
            recommended_action: HEALTH_ACTION.to_string(),
        })
        .collect()
}

pub fn error_log_issues(logs: &[LogEntry]) -> Vec<Issue> {
    logs.iter()
        .filter(|entry| entry.level == ERROR_LEVEL)
        .map(|entry| Issue {
            resource_name: resource_name_from_id(&entry.resource_id).to_string(),
            issue_type: IssueType::Error,
            severity: Severity::Medium,
            description: if entry.content.trim().is_empty() {
                "Error logged for resource".to_string()
            } else {
                entry.content.clone()
            },
            recommended_action: ERROR_ACTION.to_string(),
        })
        .collect()
}

pub fn metric_spike_issues(metrics: &[MetricSeries]) -> Vec<Issue> {
    metrics
        .iter()
        .filter(|series| has_spike(series))
        .map(|series| Issue {
            resource_name: series.resource_name.clone(),
            issue_type: IssueType::Performance,
            severity: Severity::Low,
            description: format!("Unusual spike detected in metric {}", series.metric_name),
            recommended_action: PERFORMANCE_ACTION.to_string(),
        })
        .collect()
}

/// A series spikes when its peak exceeds twice the mean of its averages.
/// Series without any averages or maxima never spike.
fn has_spike(series: &MetricSeries) -> bool {
    match (series.mean_of_averages(), series.peak_of_maxima()) {
        (Some(mean), Some(peak)) => peak > SPIKE_FACTOR * mean,
        _ => false,
    }
}

/// Last non-empty `/` segment of an ARM resource id.
pub fn resource_name_from_id(resource_id: &str) -> &str {
    resource_id
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}
