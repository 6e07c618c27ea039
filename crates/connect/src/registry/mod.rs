mod models;
mod orchestrator;
mod progress;
mod traits;

pub(crate) use models::ApiErrorResponse;
pub use models::{CreateEventRequest, EventsPage};
pub use orchestrator::{Credentials, RunMode, SyncConfig, SyncOrchestrator, SyncReport, SyncWorkspace};
pub use progress::{LogProgressReporter, NoOpProgressReporter, SyncProgressReporter, SyncStage};
pub use traits::*;
