//! Analytics event types.
//!
//! Local names, remote records and the two sets the pipeline moves between:
//! what the project wants registered and what ends up registered.

mod models;

pub use models::*;
