//! Wire shapes of the ARM responses the client reads.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use azhealth_domain::{LogEntry, MetricPoint, ResourceRef};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    pub next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubscriptionBody {
    pub subscription_id: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenericResource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub location: String,
}

impl From<GenericResource> for ResourceRef {
    fn from(raw: GenericResource) -> Self {
        ResourceRef::new(raw.name, raw.resource_type, raw.location, raw.id)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AvailabilityStatus {
    pub properties: AvailabilityProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AvailabilityProperties {
    #[serde(default)]
    pub availability_state: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LocalizableString {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub localized_value: String,
}

impl LocalizableString {
    fn text(&self) -> &str {
        if self.localized_value.is_empty() {
            &self.value
        } else {
            &self.localized_value
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventProperties {
    pub status_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventData {
    #[serde(default)]
    pub resource_id: String,
    #[serde(default)]
    pub level: String,
    pub event_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub operation_name: LocalizableString,
    #[serde(default)]
    pub status: LocalizableString,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: EventProperties,
}

impl From<EventData> for LogEntry {
    fn from(raw: EventData) -> Self {
        let mut parts: Vec<&str> = Vec::new();
        for part in [raw.operation_name.text(), raw.status.text(), raw.description.as_str()] {
            if !part.trim().is_empty() {
                parts.push(part);
            }
        }
        if let Some(message) = raw.properties.status_message.as_deref() {
            if !message.trim().is_empty() {
                parts.push(message);
            }
        }
        LogEntry {
            resource_id: raw.resource_id.clone(),
            level: raw.level.clone(),
            content: parts.join(" | "),
            timestamp: raw.event_timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetricDefinition {
    pub name: LocalizableString,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetricsResponse {
    #[serde(default)]
    pub value: Vec<Metric>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Metric {
    #[serde(default)]
    pub timeseries: Vec<TimeSeriesElement>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimeSeriesElement {
    #[serde(default)]
    pub data: Vec<MetricValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetricValue {
    pub time_stamp: DateTime<Utc>,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
}

impl From<MetricValue> for MetricPoint {
    fn from(raw: MetricValue) -> Self {
        MetricPoint {
            timestamp: raw.time_stamp,
            average: raw.average,
            maximum: raw.maximum,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: ErrorDetail,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
