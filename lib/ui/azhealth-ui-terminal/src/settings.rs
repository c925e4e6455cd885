use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;

use azhealth_adapter_azure::AzureRestClientConfig;
use azhealth_application::PipelineOptions;
use azhealth_domain::AzHealthConfig;

use crate::cli::Args;

const CONFIG_DIR: &str = ".azhealth";
const CONFIG_FILE: &str = "config.yaml";
const FALLBACK_CONFIG_FILE: &str = "azhealth-config.yaml";

/// Effective configuration after layering flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub config: AzHealthConfig,
}

impl Settings {
    pub fn resolve(args: &Args) -> Result<Self> {
        let config = match &args.config {
            Some(path) => AzHealthConfig::load_from_path(path)?,
            None => AzHealthConfig::load_or_default(&default_config_path(
                std::env::var_os("HOME").map(PathBuf::from).as_deref(),
            ))?,
        };
        Self::from_parts(args, config)
    }

    /// Flags (and their env vars) override the file; the file overrides
    /// built-in defaults.
    pub fn from_parts(args: &Args, mut config: AzHealthConfig) -> Result<Self> {
        if let Some(subscription_id) = &args.subscription_id {
            config.azure.subscription_id = Some(subscription_id.clone());
        }
        if let Some(resource_group) = &args.resource_group {
            config.report.resource_group = Some(resource_group.clone());
        }
        if let Some(output) = &args.output {
            config.report.output_path = output.clone();
        }
        if let Some(days) = args.days {
            config.report.days = days;
        }
        config.validate()?;
        Ok(Self { config })
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            resource_group: self.config.report.resource_group.clone(),
            days: self.config.report.days,
            output_path: self.config.report.output_path.clone(),
        }
    }

    pub fn client_config(&self) -> AzureRestClientConfig {
        AzureRestClientConfig {
            api_base: self.config.azure.api_base.clone(),
            subscription_id: self.config.azure.subscription_id.clone().unwrap_or_default(),
            request_timeout: Duration::from_secs(self.config.azure.request_timeout_secs),
        }
    }
}

pub fn default_config_path(home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) => home.join(CONFIG_DIR).join(CONFIG_FILE),
        None => PathBuf::from(FALLBACK_CONFIG_FILE),
    }
}
