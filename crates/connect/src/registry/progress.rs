//! Progress reporting for sync runs.
//!
//! The orchestrator announces each stage it enters and how it ended. Front
//! ends decide how to render that; [`LogProgressReporter`] writes it to the log.

use log::{error, info};
use std::fmt;

/// Stages of a sync run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncStage {
    LocateConfiguration,
    ReadConfiguration,
    FetchRemoteEvents,
    CreateEvents,
    GenerateArtifacts,
    PersistConfiguration,
}

impl SyncStage {
    pub fn description(&self) -> &'static str {
        match self {
            SyncStage::LocateConfiguration => "Locating configuration",
            SyncStage::ReadConfiguration => "Reading configuration",
            SyncStage::FetchRemoteEvents => "Fetching Fathom events",
            SyncStage::CreateEvents => "Creating missing Fathom events",
            SyncStage::GenerateArtifacts => "Generating output files",
            SyncStage::PersistConfiguration => "Updating configuration",
        }
    }
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStage::LocateConfiguration => write!(f, "locate_configuration"),
            SyncStage::ReadConfiguration => write!(f, "read_configuration"),
            SyncStage::FetchRemoteEvents => write!(f, "fetch_remote_events"),
            SyncStage::CreateEvents => write!(f, "create_events"),
            SyncStage::GenerateArtifacts => write!(f, "generate_artifacts"),
            SyncStage::PersistConfiguration => write!(f, "persist_configuration"),
        }
    }
}

/// Trait for reporting sync progress.
pub trait SyncProgressReporter: Send + Sync {
    /// A stage is starting.
    fn report_stage_start(&self, stage: SyncStage);

    /// A stage finished successfully.
    fn report_stage_complete(&self, stage: SyncStage, message: &str);

    /// A stage failed; the run stops after this.
    fn report_stage_failed(&self, stage: SyncStage, error: &str);
}

/// Reporter that writes every stage transition to the log.
#[derive(Debug, Clone, Default)]
pub struct LogProgressReporter;

impl SyncProgressReporter for LogProgressReporter {
    fn report_stage_start(&self, stage: SyncStage) {
        info!("{}...", stage.description());
    }

    fn report_stage_complete(&self, _stage: SyncStage, message: &str) {
        info!("{}", message);
    }

    fn report_stage_failed(&self, stage: SyncStage, error: &str) {
        error!("{} failed: {}", stage.description(), error);
    }
}

/// A no-op progress reporter for contexts where progress reporting is not needed.
#[derive(Debug, Clone, Default)]
pub struct NoOpProgressReporter;

impl SyncProgressReporter for NoOpProgressReporter {
    fn report_stage_start(&self, _stage: SyncStage) {
        // No-op
    }

    fn report_stage_complete(&self, _stage: SyncStage, _message: &str) {
        // No-op
    }

    fn report_stage_failed(&self, _stage: SyncStage, _error: &str) {
        // No-op
    }
}
