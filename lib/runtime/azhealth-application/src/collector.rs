use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use azhealth_domain::{
    CollectionWindow, Event, HealthRecord, LogEntry, MetricSeries, ResourceRef,
};
use azhealth_ports::{AzurePort, PortSet, ProgressPort};

/// Shared stop signal checked between resources.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Pulls inventory, health, logs and metrics for one run.
///
/// Only the inventory listing can fail the run. Every per-resource failure is
/// reported as a warning and the resource's data for that pass is left out.
#[derive(Clone)]
pub struct Collector {
    azure: Arc<dyn AzurePort>,
    progress: Arc<dyn ProgressPort>,
    cancel: CancellationFlag,
}

impl Collector {
    pub fn new(ports: &PortSet, cancel: CancellationFlag) -> Self {
        Self {
            azure: Arc::clone(&ports.azure),
            progress: Arc::clone(&ports.progress),
            cancel,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub async fn inventory(&self, resource_group: Option<&str>) -> Result<Vec<ResourceRef>> {
        let resources = self
            .azure
            .list_resources(resource_group)
            .await
            .with_context(|| match resource_group {
                Some(group) => format!("failed to list resources in resource group {group}"),
                None => "failed to list resources in subscription".to_string(),
            })?;
        debug!(count = resources.len(), "inventory listed");
        Ok(resources)
    }

    pub async fn collect_health(&self, resources: &[ResourceRef]) -> Vec<HealthRecord> {
        let mut records = Vec::with_capacity(resources.len());
        for resource in resources {
            if self.is_cancelled() {
                break;
            }
            match self.azure.get_health(resource).await {
                Ok(state) => {
                    debug!(resource = %resource.name, %state, "health fetched");
                    records.push(HealthRecord::for_resource(resource, state));
                }
                Err(err) => self.warn(format!(
                    "Could not get health status for {}: {err:#}",
                    resource.name
                )),
            }
        }
        records
    }

    pub async fn collect_logs(
        &self,
        resources: &[ResourceRef],
        window: &CollectionWindow,
    ) -> Vec<LogEntry> {
        let mut entries = Vec::new();
        for resource in resources {
            if self.is_cancelled() {
                break;
            }
            match self.azure.list_diagnostic_logs(resource, window).await {
                Ok(logs) => {
                    let before = logs.len();
                    entries.extend(logs.into_iter().filter(|entry| window.contains(entry.timestamp)));
                    debug!(resource = %resource.name, count = before, "logs fetched");
                }
                Err(err) => self.warn(format!(
                    "Could not get logs for {}: {err:#}",
                    resource.name
                )),
            }
        }
        entries
    }

    pub async fn collect_metrics(
        &self,
        resources: &[ResourceRef],
        window: &CollectionWindow,
    ) -> Vec<MetricSeries> {
        let mut series = Vec::new();
        for resource in resources {
            if self.is_cancelled() {
                break;
            }
            let definitions = match self.azure.list_metric_definitions(resource).await {
                Ok(definitions) => definitions,
                Err(err) => {
                    self.warn(format!(
                        "Could not get metrics for {}: {err:#}",
                        resource.name
                    ));
                    continue;
                }
            };
            for metric_name in definitions {
                match self
                    .azure
                    .get_metric_values(resource, &metric_name, window)
                    .await
                {
                    Ok(values) => series.push(values),
                    Err(err) => self.warn(format!(
                        "Could not get metric {metric_name} for {}: {err:#}",
                        resource.name
                    )),
                }
            }
        }
        series
    }

    fn warn(&self, message: String) {
        warn!("{message}");
        self.progress.emit(Event::warn(message));
    }
}
