//! Sync orchestrator.
//!
//! Runs the whole pipeline for one invocation: locate and read the
//! configuration, fetch the registry, create what is missing, generate the
//! artifacts and rewrite the configuration. The configuration is written last
//! so an aborted run leaves it untouched.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};

use super::progress::{SyncProgressReporter, SyncStage};
use super::traits::EventRegistryClient;
use crate::client::{FathomApiClient, DEFAULT_API_URL};
use fathom_sync_core::config::{
    discover_configuration, discover_source_root, persist, resolve_output_dir, Configuration,
};
use fathom_sync_core::errors::Result;
use fathom_sync_core::{generate, reconcile, EventName, ReconciledEventSet};

/// Credentials for the Fathom API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub site_id: String,
    pub api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("site_id", &self.site_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// How a run behaves, decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Reconcile with the registry and rewrite the configuration.
    Live(Credentials),
    /// No credentials: emit empty artifacts, leave the configuration alone.
    Placeholder,
}

impl RunMode {
    /// `Live` when both values are present and non-blank, `Placeholder` otherwise.
    pub fn from_credentials(site_id: Option<String>, api_key: Option<String>) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        match (present(site_id), present(api_key)) {
            (Some(site_id), Some(api_key)) => RunMode::Live(Credentials { site_id, api_key }),
            _ => RunMode::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RunMode::Placeholder)
    }
}

/// Configuration for sync operations.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the Fathom API.
    pub api_url: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Where a run looks for its inputs and writes its outputs.
#[derive(Debug, Clone)]
pub struct SyncWorkspace {
    /// Directory the configuration and source root searches start from.
    pub working_dir: PathBuf,
    /// Output directory override, relative to the source root. Takes
    /// precedence over `outDir` from the configuration file.
    pub out_dir: Option<String>,
}

impl SyncWorkspace {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            out_dir: None,
        }
    }

    pub fn with_out_dir(mut self, out_dir: Option<String>) -> Self {
        self.out_dir = out_dir;
        self
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub placeholder: bool,
    /// Events already registered before the run.
    pub remote_events: usize,
    /// Events created during the run, in completion order.
    pub created: Vec<EventName>,
    /// Events in the generated artifacts.
    pub total_events: usize,
    pub output_dir: PathBuf,
    pub written_files: Vec<PathBuf>,
    /// Configuration file that was rewritten, if any.
    pub configuration_path: Option<PathBuf>,
}

impl SyncReport {
    pub fn message(&self) -> String {
        if self.placeholder {
            return format!(
                "Placeholder artifacts generated in {}",
                self.output_dir.display()
            );
        }
        format!(
            "Fathom events synced: {} events ({} created) written to {}",
            self.total_events,
            self.created.len(),
            self.output_dir.display()
        )
    }
}

/// Orchestrates a sync run.
///
/// # Example
///
/// ```ignore
/// let orchestrator = SyncOrchestrator::new(Arc::new(LogProgressReporter), SyncConfig::default());
/// let mode = RunMode::from_credentials(site_id, api_key);
/// let report = orchestrator.run(&mode, &SyncWorkspace::new(cwd)).await?;
/// ```
pub struct SyncOrchestrator<P: SyncProgressReporter> {
    progress_reporter: Arc<P>,
    config: SyncConfig,
}

impl<P: SyncProgressReporter> SyncOrchestrator<P> {
    pub fn new(progress_reporter: Arc<P>, config: SyncConfig) -> Self {
        Self {
            progress_reporter,
            config,
        }
    }

    /// Run the pipeline in the given mode.
    pub async fn run(&self, mode: &RunMode, workspace: &SyncWorkspace) -> Result<SyncReport> {
        match mode {
            RunMode::Live(credentials) => {
                let client = FathomApiClient::new(
                    &self.config.api_url,
                    &credentials.site_id,
                    &credentials.api_key,
                )?;
                info!("Syncing events for Fathom site {}", client.site_id());
                self.sync_live(&client, workspace).await
            }
            RunMode::Placeholder => self.generate_placeholder(workspace),
        }
    }

    /// Full reconciliation against `api_client`.
    pub async fn sync_live(
        &self,
        api_client: &dyn EventRegistryClient,
        workspace: &SyncWorkspace,
    ) -> Result<SyncReport> {
        // Step 1: configuration
        self.progress_reporter
            .report_stage_start(SyncStage::LocateConfiguration);
        let configuration_path = self.finish(
            SyncStage::LocateConfiguration,
            discover_configuration(&workspace.working_dir),
            |path| format!("Configuration file located in {}", path.display()),
        )?;

        self.progress_reporter
            .report_stage_start(SyncStage::ReadConfiguration);
        let configuration = self.finish(
            SyncStage::ReadConfiguration,
            Configuration::load(&configuration_path),
            |config| format!("Configuration parsed: {} events declared", config.events().len()),
        )?;

        let desired = configuration.desired_events();
        if desired.skipped() > 0 {
            debug!(
                "Ignored {} blank or repeated entries in {}",
                desired.skipped(),
                configuration_path.display()
            );
        }

        // Step 2: remote state
        self.progress_reporter
            .report_stage_start(SyncStage::FetchRemoteEvents);
        let remote = self.finish(
            SyncStage::FetchRemoteEvents,
            api_client.fetch_all().await,
            |events| format!("Fetched {} Fathom events", events.len()),
        )?;
        let remote_events = remote.len();

        // Step 3: create what is missing
        let reconciliation = reconcile(&desired, remote);
        self.progress_reporter
            .report_stage_start(SyncStage::CreateEvents);
        let created = self.finish(
            SyncStage::CreateEvents,
            api_client.create_many(reconciliation.to_create()).await,
            |created| format!("Created {} Fathom events", created.len()),
        )?;
        let created_names: Vec<EventName> = created.iter().map(|e| e.name.clone()).collect();
        let merged = reconciliation.merge(created);
        info!("Fathom events synced: {} events", merged.len());

        // Step 4: artifacts
        let output_dir = self.output_dir(workspace, configuration.out_dir());
        self.progress_reporter
            .report_stage_start(SyncStage::GenerateArtifacts);
        let written_files = self.finish(
            SyncStage::GenerateArtifacts,
            generate(&merged).write_to(&output_dir),
            |files| format!("Generated {} files in {}", files.len(), output_dir.display()),
        )?;

        // Step 5: configuration rewrite, last
        self.progress_reporter
            .report_stage_start(SyncStage::PersistConfiguration);
        self.finish(
            SyncStage::PersistConfiguration,
            persist(&configuration_path, &configuration, &merged),
            |_| format!("Configuration {} updated", configuration_path.display()),
        )?;

        Ok(SyncReport {
            placeholder: false,
            remote_events,
            created: created_names,
            total_events: merged.len(),
            output_dir,
            written_files,
            configuration_path: Some(configuration_path),
        })
    }

    /// Empty artifacts for runs without credentials.
    ///
    /// The configuration file, when present, is only consulted for `outDir`.
    pub fn generate_placeholder(&self, workspace: &SyncWorkspace) -> Result<SyncReport> {
        info!("Fathom credentials missing, generating placeholder artifacts");

        let configured = match workspace.out_dir {
            Some(_) => None,
            None => configured_out_dir(&workspace.working_dir),
        };
        let output_dir = self.output_dir(workspace, configured.as_deref());

        self.progress_reporter
            .report_stage_start(SyncStage::GenerateArtifacts);
        let written_files = self.finish(
            SyncStage::GenerateArtifacts,
            generate(&ReconciledEventSet::empty()).write_to(&output_dir),
            |files| {
                format!(
                    "Generated {} placeholder files in {}",
                    files.len(),
                    output_dir.display()
                )
            },
        )?;

        Ok(SyncReport {
            placeholder: true,
            remote_events: 0,
            created: Vec::new(),
            total_events: 0,
            output_dir,
            written_files,
            configuration_path: None,
        })
    }

    fn output_dir(&self, workspace: &SyncWorkspace, configured: Option<&str>) -> PathBuf {
        let source_root = discover_source_root(&workspace.working_dir);
        resolve_output_dir(&source_root, workspace.out_dir.as_deref().or(configured))
    }

    /// Report the outcome of a stage and pass the result through.
    fn finish<T>(
        &self,
        stage: SyncStage,
        result: Result<T>,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T> {
        match &result {
            Ok(value) => self
                .progress_reporter
                .report_stage_complete(stage, &describe(value)),
            Err(err) => self
                .progress_reporter
                .report_stage_failed(stage, &err.to_string()),
        }
        result
    }
}

/// `outDir` from the configuration file, if one can be found and read.
fn configured_out_dir(working_dir: &Path) -> Option<String> {
    let path = match discover_configuration(working_dir) {
        Ok(path) => path,
        Err(err) => {
            debug!("{}", err);
            return None;
        }
    };
    match Configuration::load(&path) {
        Ok(configuration) => configuration.out_dir().map(str::to_string),
        Err(err) => {
            warn!("Ignoring configuration in placeholder mode: {}", err);
            None
        }
    }
}
