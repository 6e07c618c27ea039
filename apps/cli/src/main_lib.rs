use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogLevel};
use fathom_sync_connect::{LogProgressReporter, SyncOrchestrator, SyncReport};

/// Installs the global subscriber. Records emitted through the `log` facade
/// by the library crates are forwarded to it.
pub fn init_tracing(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level.as_directive()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let fmt_layer = fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn run(config: &Config) -> anyhow::Result<SyncReport> {
    let orchestrator = SyncOrchestrator::new(Arc::new(LogProgressReporter), config.sync.clone());
    let report = orchestrator.run(&config.mode, &config.workspace).await?;
    Ok(report)
}
