use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::ResourceRef;

/// Provider-reported availability of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailabilityState {
    Available,
    Degraded,
    Unavailable,
    Unknown,
}

impl AvailabilityState {
    /// Parses the provider spelling. Anything unrecognised is `Unknown`.
    pub fn from_provider(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "available" => Self::Available,
            "degraded" => Self::Degraded,
            "unavailable" => Self::Unavailable,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Degraded => "Degraded",
            Self::Unavailable => "Unavailable",
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for AvailabilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub resource_name: String,
    pub resource_type: String,
    pub location: String,
    pub availability_state: AvailabilityState,
}

impl HealthRecord {
    pub fn for_resource(resource: &ResourceRef, state: AvailabilityState) -> Self {
        Self {
            resource_name: resource.name.clone(),
            resource_type: resource.resource_type.clone(),
            location: resource.location.clone(),
            availability_state: state,
        }
    }
}
