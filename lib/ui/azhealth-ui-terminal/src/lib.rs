//! Command-line entry point for the health report.

pub mod cli;
pub mod logging;
pub mod progress;
pub mod settings;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use azhealth_adapter_azure::{AccessToken, AzureRestClient};
use azhealth_application::{CancellationFlag, HealthReportPipeline, RunSummary};
use azhealth_domain::Event;
use azhealth_ports::{PortSet, ProgressPort};

pub use cli::Args;
pub use progress::TerminalProgressPort;
pub use settings::Settings;

/// Parses arguments, runs the pipeline and maps the outcome to an exit code.
pub fn run() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();
    logging::init(args.verbose);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let err = anyhow::Error::new(err).context("failed to start async runtime");
            return report_failure(&TerminalProgressPort, &err);
        }
    };

    match runtime.block_on(execute(args)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => report_failure(&TerminalProgressPort, &err),
    }
}

fn report_failure(progress: &dyn ProgressPort, err: &anyhow::Error) -> ExitCode {
    error!("{err:#}");
    progress.emit(Event::error(format!("{err:#}")));
    ExitCode::FAILURE
}

async fn execute(args: Args) -> Result<RunSummary> {
    let settings = Settings::resolve(&args)?;
    let token = AccessToken::from_env().context("Azure authentication failed")?;
    let client = AzureRestClient::new(settings.client_config(), token)?;
    let ports = PortSet::new(Arc::new(client)).with_progress(Arc::new(TerminalProgressPort));

    let cancel = CancellationFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let pipeline =
        HealthReportPipeline::new(ports, settings.pipeline_options()).with_cancellation(cancel);
    Ok(pipeline.run().await?)
}
