use std::process::ExitCode;

use fathom_sync::config::{Cli, Config};
use fathom_sync::{init_tracing, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::from_env();
    init_tracing(cli.log_level);

    let outcome = match Config::from_cli(cli) {
        Ok(config) => run(&config).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(report) => {
            tracing::info!("{}", report.message());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Fathom event sync failed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
