use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One time grain of a metric. Azure omits aggregations for empty grains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries {
    pub resource_name: String,
    pub metric_name: String,
    pub data_points: Vec<MetricPoint>,
}

impl MetricSeries {
    pub fn new(resource_name: impl Into<String>, metric_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            metric_name: metric_name.into(),
            data_points: Vec::new(),
        }
    }

    /// Arithmetic mean of the present `average` values.
    pub fn mean_of_averages(&self) -> Option<f64> {
        let values: Vec<f64> = self.data_points.iter().filter_map(|p| p.average).collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Largest present `maximum` value.
    pub fn peak_of_maxima(&self) -> Option<f64> {
        self.data_points
            .iter()
            .filter_map(|p| p.maximum)
            .fold(None, |acc, value| match acc {
                Some(current) if current >= value => Some(current),
                _ => Some(value),
            })
    }
}
