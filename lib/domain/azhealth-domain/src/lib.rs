//! Domain models and invariants.

pub mod config;
pub mod events;
pub mod health;
pub mod issue;
pub mod logs;
pub mod metrics;
pub mod report;
pub mod resource;
pub mod window;

pub use config::{AzHealthConfig, AzureConfig, ConfigError, ReportConfig};
pub use events::{Event, EventLevel};
pub use health::{AvailabilityState, HealthRecord};
pub use issue::{Issue, IssueType, Severity};
pub use logs::LogEntry;
pub use metrics::{MetricPoint, MetricSeries};
pub use report::Report;
pub use resource::{ResourceRef, SubscriptionInfo};
pub use window::CollectionWindow;
