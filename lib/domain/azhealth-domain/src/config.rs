use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://management.azure.com";
pub const DEFAULT_OUTPUT_PATH: &str = "AzureHealthReport.html";
pub const DEFAULT_DAYS: u32 = 7;
pub const MAX_DAYS: u32 = 3650;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("subscription id is required (flag, AZURE_SUBSCRIPTION_ID or config file)")]
    MissingSubscription,
    #[error("lookback window must be at least one day")]
    ZeroDays,
    #[error("lookback window of {0} days exceeds the maximum of {max}", max = MAX_DAYS)]
    DaysOutOfRange(u32),
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzHealthConfig {
    pub azure: AzureConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    pub subscription_id: Option<String>,
    pub api_base: String,
    pub request_timeout_secs: u64,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            subscription_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_path: PathBuf,
    pub days: u32,
    pub resource_group: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            days: DEFAULT_DAYS,
            resource_group: None,
        }
    }
}

impl AzHealthConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        match self.azure.subscription_id.as_deref() {
            Some(id) if !id.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingSubscription),
        }
        if self.report.days == 0 {
            return Err(ConfigError::ZeroDays);
        }
        if self.report.days > MAX_DAYS {
            return Err(ConfigError::DaysOutOfRange(self.report.days));
        }
        if self.azure.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "azure:\n  subscription_id: \"0000-1111\"\nreport:\n  days: 3\n"
        )
        .unwrap();

        let config = AzHealthConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.azure.subscription_id.as_deref(), Some("0000-1111"));
        assert_eq!(config.azure.api_base, DEFAULT_API_BASE);
        assert_eq!(config.azure.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.report.days, 3);
        assert_eq!(config.report.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert!(config.report.resource_group.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AzHealthConfig::load_or_default(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, AzHealthConfig::default());
    }

    #[test]
    fn test_load_from_path_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = AzHealthConfig::load_from_path(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn test_validate() {
        let mut config = AzHealthConfig::default();
        assert_eq!(config.validate(), Err(ConfigError::MissingSubscription));

        config.azure.subscription_id = Some("sub".to_string());
        assert_eq!(config.validate(), Ok(()));

        config.report.days = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDays));

        config.report.days = MAX_DAYS;
        assert_eq!(config.validate(), Ok(()));

        config.report.days = 4_000_000_000;
        assert_eq!(config.validate(), Err(ConfigError::DaysOutOfRange(4_000_000_000)));

        config.report.days = 1;
        config.azure.request_timeout_secs = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }
}
