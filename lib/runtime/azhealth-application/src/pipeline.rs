use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use azhealth_domain::{CollectionWindow, Event, Report};
use azhealth_ports::{PortSet, ProgressPort};

use crate::analyzer::analyze;
use crate::collector::{CancellationFlag, Collector};
use crate::reporter::write_report;

/// Failures that end a run. Everything else is downgraded to a warning.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("lookback window of {0} days is out of range")]
    Window(u32),
    #[error("failed to connect to Azure")]
    Connect(#[source] anyhow::Error),
    #[error("failed to list resources")]
    Inventory(#[source] anyhow::Error),
    #[error("failed to write report")]
    Report(#[source] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub resource_group: Option<String>,
    pub days: u32,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub resources: usize,
    pub issues: usize,
    pub cancelled: bool,
}

pub struct HealthReportPipeline {
    ports: PortSet,
    options: PipelineOptions,
    cancel: CancellationFlag,
}

impl HealthReportPipeline {
    pub fn new(ports: PortSet, options: PipelineOptions) -> Self {
        Self {
            ports,
            options,
            cancel: CancellationFlag::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// connect, collect health, collect logs, collect metrics, analyze,
    /// report. Strictly one stage at a time.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let progress = Arc::clone(&self.ports.progress);
        let collector = Collector::new(&self.ports, self.cancel.clone());
        let window = CollectionWindow::last_days(self.options.days, Utc::now())
            .ok_or(PipelineError::Window(self.options.days))?;

        self.stage("Connecting to Azure...");
        let subscription = self
            .ports
            .azure
            .connect()
            .await
            .map_err(PipelineError::Connect)?;
        self.stage(format!(
            "Connected to subscription {} ({})",
            subscription.display_name, subscription.subscription_id
        ));

        self.stage("Collecting resource health data...");
        let resources = collector
            .inventory(self.options.resource_group.as_deref())
            .await
            .map_err(PipelineError::Inventory)?;
        let health = collector.collect_health(&resources).await;

        self.stage(format!(
            "Collecting diagnostic logs for the last {} days...",
            self.options.days
        ));
        let logs = collector.collect_logs(&resources, &window).await;

        self.stage("Collecting performance metrics...");
        let metrics = collector.collect_metrics(&resources, &window).await;

        let cancelled = collector.is_cancelled();
        if cancelled {
            warn!("collection cancelled, generating partial report");
            progress.emit(Event::warn(
                "Collection cancelled; generating a partial report from collected data",
            ));
        }

        self.stage("Analyzing collected data...");
        let issues = analyze(&health, &logs, &metrics);
        let report = Report::new(health, issues).with_partial(cancelled);
        for orphan in report.orphan_issues() {
            warn!(
                resource = %orphan.resource_name,
                issue_type = %orphan.issue_type,
                "issue references a resource without a health record"
            );
        }

        self.stage("Generating HTML report...");
        write_report(&report, &self.options.output_path).map_err(PipelineError::Report)?;

        let summary = RunSummary {
            output_path: self.options.output_path.clone(),
            resources: report.health_records.len(),
            issues: report.issues.len(),
            cancelled,
        };
        info!(
            path = %summary.output_path.display(),
            resources = summary.resources,
            issues = summary.issues,
            "report generated"
        );
        progress.emit(Event::info(format!(
            "Report generated successfully: {}",
            summary.output_path.display()
        )));
        Ok(summary)
    }

    fn stage(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        self.ports.progress.emit(Event::info(message));
    }
}
