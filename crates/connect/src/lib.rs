//! fathom-sync connect - Fathom registry client and sync pipeline.
//!
//! This crate provides the HTTP client for the Fathom events API and the
//! orchestrator that runs a full sync (or a placeholder run) on top of
//! `fathom-sync-core`.

pub mod client;
pub mod registry;

// Re-export commonly used types
pub use client::{FathomApiClient, DEFAULT_API_URL, PAGE_LIMIT};
pub use registry::{
    CreateEventRequest, Credentials, EventRegistryClient, EventsPage, LogProgressReporter,
    NoOpProgressReporter, RunMode, SyncConfig, SyncOrchestrator, SyncProgressReporter, SyncReport,
    SyncStage, SyncWorkspace,
};
