use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use azhealth_domain::{
    AvailabilityState, CollectionWindow, LogEntry, MetricSeries, ResourceRef, SubscriptionInfo,
};
use azhealth_ports::AzurePort;

use crate::credential::AccessToken;
use crate::error::AzureApiError;
use crate::models::{
    AvailabilityStatus, ErrorResponse, EventData, GenericResource, MetricDefinition,
    MetricsResponse, Page, SubscriptionBody,
};

const SUBSCRIPTION_API_VERSION: &str = "2022-12-01";
const RESOURCES_API_VERSION: &str = "2021-04-01";
const HEALTH_API_VERSION: &str = "2022-10-01";
const ACTIVITY_LOG_API_VERSION: &str = "2015-04-01";
const METRICS_API_VERSION: &str = "2018-01-01";
const METRIC_INTERVAL: &str = "PT1H";

#[derive(Debug, Clone)]
pub struct AzureRestClientConfig {
    pub api_base: String,
    pub subscription_id: String,
    pub request_timeout: Duration,
}

/// Read-only ARM client. One HTTP attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct AzureRestClient {
    http: reqwest::Client,
    api_base: String,
    subscription_id: String,
    token: AccessToken,
}

impl AzureRestClient {
    pub fn new(config: AzureRestClientConfig, token: AccessToken) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            subscription_id: config.subscription_id,
            token,
        })
    }

    fn subscription_url(&self) -> String {
        format!("{}/subscriptions/{}", self.api_base, self.subscription_id)
    }

    fn resource_url(&self, resource: &ResourceRef, suffix: &str) -> String {
        format!("{}{}{}", self.api_base, resource.id, suffix)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(self.token.secret())
            .send()
            .await
            .context("request to Azure failed")?;
        let status = response.status();
        let url = response.url().to_string();
        debug!(%status, %url, "azure response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|parsed| parsed.error)
                .unwrap_or_default();
            return Err(AzureApiError::Status {
                status,
                url,
                code: if detail.code.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown").to_string()
                } else {
                    detail.code
                },
                message: detail.message,
            }
            .into());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode response from {url}"))
    }

    /// Follows `nextLink` until the listing is exhausted or a link repeats.
    async fn get_all_pages<T: DeserializeOwned>(&self, first: RequestBuilder) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut page: Page<T> = self.send(first).await?;
        loop {
            items.append(&mut page.value);
            match page.next_link.take() {
                Some(next) if !next.is_empty() => {
                    if !seen.insert(next.clone()) {
                        warn!(next_link = %next, "nextLink repeated, stopping pagination");
                        break;
                    }
                    page = self.send(self.http.get(&next)).await?;
                }
                _ => break,
            }
        }
        Ok(items)
    }
}

fn iso(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// `metricnames` is comma separated; ARM reads `%2` as a literal comma.
fn metric_names_param(metric_name: &str) -> String {
    metric_name.replace(',', "%2")
}

#[async_trait]
impl AzurePort for AzureRestClient {
    async fn connect(&self) -> Result<SubscriptionInfo> {
        let request = self
            .http
            .get(self.subscription_url())
            .query(&[("api-version", SUBSCRIPTION_API_VERSION)]);
        let body: SubscriptionBody = self
            .send(request)
            .await
            .with_context(|| format!("failed to open subscription {}", self.subscription_id))?;
        Ok(SubscriptionInfo {
            subscription_id: body.subscription_id,
            display_name: body.display_name,
        })
    }

    async fn list_resources(&self, resource_group: Option<&str>) -> Result<Vec<ResourceRef>> {
        let url = match resource_group {
            Some(group) => format!("{}/resourceGroups/{}/resources", self.subscription_url(), group),
            None => format!("{}/resources", self.subscription_url()),
        };
        let request = self
            .http
            .get(url)
            .query(&[("api-version", RESOURCES_API_VERSION)]);
        let resources: Vec<GenericResource> = self.get_all_pages(request).await?;
        Ok(resources.into_iter().map(ResourceRef::from).collect())
    }

    async fn get_health(&self, resource: &ResourceRef) -> Result<AvailabilityState> {
        let request = self
            .http
            .get(self.resource_url(
                resource,
                "/providers/Microsoft.ResourceHealth/availabilityStatuses/current",
            ))
            .query(&[("api-version", HEALTH_API_VERSION)]);
        let status: AvailabilityStatus = self.send(request).await?;
        Ok(AvailabilityState::from_provider(
            &status.properties.availability_state,
        ))
    }

    async fn list_diagnostic_logs(
        &self,
        resource: &ResourceRef,
        window: &CollectionWindow,
    ) -> Result<Vec<LogEntry>> {
        let filter = format!(
            "eventTimestamp ge '{}' and eventTimestamp le '{}' and resourceUri eq '{}'",
            iso(window.start),
            iso(window.end),
            resource.id
        );
        let request = self
            .http
            .get(format!(
                "{}/providers/Microsoft.Insights/eventtypes/management/values",
                self.subscription_url()
            ))
            .query(&[
                ("api-version", ACTIVITY_LOG_API_VERSION),
                ("$filter", filter.as_str()),
            ]);
        let events: Vec<EventData> = self.get_all_pages(request).await?;
        Ok(events.into_iter().map(LogEntry::from).collect())
    }

    async fn list_metric_definitions(&self, resource: &ResourceRef) -> Result<Vec<String>> {
        let request = self
            .http
            .get(self.resource_url(resource, "/providers/Microsoft.Insights/metricDefinitions"))
            .query(&[("api-version", METRICS_API_VERSION)]);
        let page: Page<MetricDefinition> = self.send(request).await?;
        Ok(page
            .value
            .into_iter()
            .map(|definition| definition.name.value)
            .filter(|name| !name.is_empty())
            .collect())
    }

    async fn get_metric_values(
        &self,
        resource: &ResourceRef,
        metric_name: &str,
        window: &CollectionWindow,
    ) -> Result<MetricSeries> {
        let timespan = format!("{}/{}", iso(window.start), iso(window.end));
        let metric_names = metric_names_param(metric_name);
        let request = self
            .http
            .get(self.resource_url(resource, "/providers/Microsoft.Insights/metrics"))
            .query(&[
                ("api-version", METRICS_API_VERSION),
                ("metricnames", metric_names.as_str()),
                ("timespan", timespan.as_str()),
                ("aggregation", "Average,Maximum"),
                ("interval", METRIC_INTERVAL),
            ]);
        let body: MetricsResponse = self.send(request).await?;

        let mut series = MetricSeries::new(resource.name.clone(), metric_name);
        series.data_points = body
            .value
            .into_iter()
            .flat_map(|metric| metric.timeseries)
            .flat_map(|element| element.data)
            .map(Into::into)
            .collect();
        Ok(series)
    }
}
