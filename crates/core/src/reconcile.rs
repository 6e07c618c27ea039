//! Diffing desired event names against the remote registry.

use log::{debug, warn};
use std::collections::HashSet;

use crate::events::{DesiredEventSet, EventName, ReconciledEventSet, RemoteEvent};

/// Outcome of comparing the desired names with the remote registry.
///
/// Holds on to the remote events so that [`Reconciliation::merge`] can append
/// whatever the registry created without re-reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    to_create: Vec<EventName>,
    remote: Vec<RemoteEvent>,
}

/// Computes which desired names are missing remotely.
///
/// A name is missing when no remote event carries exactly the same name.
/// Missing names keep their declaration order.
pub fn reconcile(desired: &DesiredEventSet, remote: Vec<RemoteEvent>) -> Reconciliation {
    let mut remote_names: HashSet<&str> = HashSet::with_capacity(remote.len());
    for event in &remote {
        if !remote_names.insert(event.name.as_str()) {
            warn!(
                "Remote registry holds more than one event named '{}' (id {})",
                event.name, event.id
            );
        }
    }

    let to_create: Vec<EventName> = desired
        .iter()
        .filter(|name| !remote_names.contains(name.as_str()))
        .cloned()
        .collect();

    debug!(
        "Reconciled {} desired events against {} remote events: {} to create",
        desired.len(),
        remote.len(),
        to_create.len()
    );

    Reconciliation { to_create, remote }
}

impl Reconciliation {
    /// Names that have to be created remotely, in declaration order.
    pub fn to_create(&self) -> &[EventName] {
        &self.to_create
    }

    pub fn remote(&self) -> &[RemoteEvent] {
        &self.remote
    }

    /// True when every desired name already exists remotely.
    pub fn is_up_to_date(&self) -> bool {
        self.to_create.is_empty()
    }

    /// Appends the freshly created events after the remote ones.
    ///
    /// Remote events keep their registry order. Only the first event carrying
    /// a given name is kept, whether the repeat comes from the registry or
    /// from the creations, so the merged set never repeats a name.
    pub fn merge(self, created: Vec<RemoteEvent>) -> ReconciledEventSet {
        let mut merged = Vec::with_capacity(self.remote.len() + created.len());
        let mut names: HashSet<EventName> = HashSet::new();

        for event in self.remote.into_iter().chain(created) {
            if names.insert(event.name.clone()) {
                merged.push(event);
            } else {
                warn!(
                    "Skipping event '{}' (id {}): name already registered",
                    event.name, event.id
                );
            }
        }

        ReconciledEventSet::new(merged)
    }
}
