//! fathom-sync core - event reconciliation and code generation.
//!
//! This crate holds everything that does not talk to the network:
//! the event model, the configuration file, the diff between desired and
//! registered events, and the TypeScript artifacts generated from the result.
//! The registry client and the pipeline driver live in `fathom-sync-connect`.

pub mod codegen;
pub mod config;
pub mod errors;
pub mod events;
pub mod reconcile;

pub use codegen::{generate, GeneratedArtifacts};
pub use config::{persist, Configuration};
pub use events::{DesiredEventSet, EventName, ReconciledEventSet, RemoteEvent};
pub use reconcile::{reconcile, Reconciliation};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
