use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use azhealth_domain::{
    AvailabilityState, CollectionWindow, LogEntry, MetricPoint, MetricSeries, ResourceRef,
    SubscriptionInfo,
};
use azhealth_ports::AzurePort;

pub fn vm(name: &str) -> ResourceRef {
    ResourceRef::new(
        name,
        "Microsoft.Compute/virtualMachines",
        "westeurope",
        format!("/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/{name}"),
    )
}

pub fn point(hour: u32, average: f64, maximum: f64) -> MetricPoint {
    MetricPoint {
        timestamp: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
        average: Some(average),
        maximum: Some(maximum),
    }
}

/// Scriptable stand-in for an Azure subscription.
#[derive(Default)]
pub struct FakeAzure {
    pub fail_connect: bool,
    pub fail_inventory: bool,
    pub resources: Vec<ResourceRef>,
    pub states: HashMap<String, AvailabilityState>,
    pub failing_health: HashSet<String>,
    pub failing_logs: HashSet<String>,
    pub failing_definitions: HashSet<String>,
    pub failing_metrics: HashSet<(String, String)>,
    pub logs: HashMap<String, Vec<LogEntry>>,
    pub metrics: HashMap<String, Vec<MetricSeries>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeAzure {
    pub fn with_resources(resources: Vec<ResourceRef>) -> Self {
        Self {
            resources,
            ..Default::default()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AzurePort for FakeAzure {
    async fn connect(&self) -> Result<SubscriptionInfo> {
        self.record("connect".to_string());
        if self.fail_connect {
            bail!("token rejected");
        }
        Ok(SubscriptionInfo {
            subscription_id: "sub".to_string(),
            display_name: "Test Subscription".to_string(),
        })
    }

    async fn list_resources(&self, resource_group: Option<&str>) -> Result<Vec<ResourceRef>> {
        self.record(format!("list_resources:{}", resource_group.unwrap_or("*")));
        if self.fail_inventory {
            bail!("403 Forbidden");
        }
        Ok(self.resources.clone())
    }

    async fn get_health(&self, resource: &ResourceRef) -> Result<AvailabilityState> {
        self.record(format!("health:{}", resource.name));
        if self.failing_health.contains(&resource.name) {
            return Err(anyhow!("health endpoint timed out"));
        }
        Ok(self
            .states
            .get(&resource.name)
            .copied()
            .unwrap_or(AvailabilityState::Available))
    }

    async fn list_diagnostic_logs(
        &self,
        resource: &ResourceRef,
        _window: &CollectionWindow,
    ) -> Result<Vec<LogEntry>> {
        self.record(format!("logs:{}", resource.name));
        if self.failing_logs.contains(&resource.name) {
            bail!("log query rejected");
        }
        Ok(self.logs.get(&resource.name).cloned().unwrap_or_default())
    }

    async fn list_metric_definitions(&self, resource: &ResourceRef) -> Result<Vec<String>> {
        self.record(format!("definitions:{}", resource.name));
        if self.failing_definitions.contains(&resource.name) {
            bail!("metric definitions unavailable");
        }
        Ok(self
            .metrics
            .get(&resource.name)
            .map(|series| series.iter().map(|s| s.metric_name.clone()).collect())
            .unwrap_or_default())
    }

    async fn get_metric_values(
        &self,
        resource: &ResourceRef,
        metric_name: &str,
        _window: &CollectionWindow,
    ) -> Result<MetricSeries> {
        self.record(format!("metric:{}:{}", resource.name, metric_name));
        if self
            .failing_metrics
            .contains(&(resource.name.clone(), metric_name.to_string()))
        {
            bail!("metric query failed");
        }
        self.metrics
            .get(&resource.name)
            .and_then(|series| series.iter().find(|s| s.metric_name == metric_name))
            .cloned()
            .ok_or_else(|| anyhow!("unknown metric {metric_name}"))
    }
}
