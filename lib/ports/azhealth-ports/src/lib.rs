//! Capability traits the pipeline depends on.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use azhealth_domain::{
    AvailabilityState, CollectionWindow, Event, LogEntry, MetricSeries, ResourceRef,
    SubscriptionInfo,
};

/// Read-only view of an authenticated Azure subscription.
///
/// Every call is made at most once per resource; implementations must not
/// retry on their own.
#[async_trait]
pub trait AzurePort: Send + Sync {
    /// Validates credentials against the target subscription.
    async fn connect(&self) -> Result<SubscriptionInfo>;

    /// Lists every resource in the subscription, or only those in
    /// `resource_group` when given.
    async fn list_resources(&self, resource_group: Option<&str>) -> Result<Vec<ResourceRef>>;

    async fn get_health(&self, resource: &ResourceRef) -> Result<AvailabilityState>;

    async fn list_diagnostic_logs(
        &self,
        resource: &ResourceRef,
        window: &CollectionWindow,
    ) -> Result<Vec<LogEntry>>;

    /// Names of the metrics the provider exposes for `resource`.
    async fn list_metric_definitions(&self, resource: &ResourceRef) -> Result<Vec<String>>;

    async fn get_metric_values(
        &self,
        resource: &ResourceRef,
        metric_name: &str,
        window: &CollectionWindow,
    ) -> Result<MetricSeries>;
}

pub trait ProgressPort: Send + Sync {
    fn emit(&self, event: Event);
}

#[derive(Clone)]
pub struct PortSet {
    pub azure: Arc<dyn AzurePort>,
    pub progress: Arc<dyn ProgressPort>,
}

impl PortSet {
    pub fn new(azure: Arc<dyn AzurePort>) -> Self {
        Self {
            azure,
            progress: Arc::new(NullProgressPort),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressPort>) -> Self {
        self.progress = progress;
        self
    }
}

#[derive(Clone, Copy, Default)]
pub struct NullProgressPort;

impl ProgressPort for NullProgressPort {
    fn emit(&self, _event: Event) {}
}

#[derive(Clone, Default)]
pub struct InMemoryProgressPort {
    events: Arc<Mutex<VecDeque<Event>>>,
}

impl InMemoryProgressPort {
    pub fn drain_events(&self) -> Vec<Event> {
        if let Ok(mut guard) = self.events.lock() {
            guard.drain(..).collect()
        } else {
            Vec::new()
        }
    }
}

impl ProgressPort for InMemoryProgressPort {
    fn emit(&self, event: Event) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push_back(event);
        }
    }
}
