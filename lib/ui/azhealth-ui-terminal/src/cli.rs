use std::path::PathBuf;

use clap::Parser;

use azhealth_domain::config::MAX_DAYS;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "azhealth",
    version,
    about = "Collect Azure resource health, logs and metrics into an HTML report"
)]
pub struct Args {
    /// Subscription to inspect.
    #[arg(long, env = "AZURE_SUBSCRIPTION_ID")]
    pub subscription_id: Option<String>,

    /// Limit the report to one resource group.
    #[arg(long, short = 'g', env = "AZHEALTH_RESOURCE_GROUP")]
    pub resource_group: Option<String>,

    /// Where to write the HTML report [default: AzureHealthReport.html]
    #[arg(long, short = 'o', env = "AZHEALTH_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Lookback window for logs and metrics, in days [default: 7]
    #[arg(
        long,
        short = 'd',
        env = "AZHEALTH_DAYS",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DAYS))
    )]
    pub days: Option<u32>,

    /// YAML config file.
    #[arg(long, env = "AZHEALTH_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, short = 'v')]
    pub verbose: bool,
}
