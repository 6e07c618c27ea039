//! Event models shared by the reconciler, the generator and the registry client.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::errors::{Error, Result};

/// Name of an analytics event.
///
/// Opaque, case-sensitive and never empty. Equality is exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventName(String);

impl EventName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidEventName(
                "event names must not be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EventName> for String {
    fn from(name: EventName) -> Self {
        name.0
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EventName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EventName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An event registered with the remote registry.
///
/// `id` is assigned by the registry at creation time and never changes.
/// Fields other than `id` and `name` in the API payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    pub name: EventName,
}

impl RemoteEvent {
    pub fn new(id: impl Into<String>, name: EventName) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// The event names the project wants registered, in declaration order.
///
/// Built from the raw configuration list: `null` and empty entries are dropped
/// and repeated names keep only their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredEventSet {
    names: Vec<EventName>,
    skipped: usize,
}

impl DesiredEventSet {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        let mut skipped = 0;

        for entry in entries {
            let Some(name) = entry.and_then(|raw| EventName::new(raw).ok()) else {
                skipped += 1;
                continue;
            };
            if seen.insert(name.clone()) {
                names.push(name);
            } else {
                skipped += 1;
            }
        }

        Self { names, skipped }
    }

    /// Convenience constructor for lists without `null` entries.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_entries(names.into_iter().map(Some))
    }

    pub fn names(&self) -> &[EventName] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventName> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of raw entries dropped as blank, `null` or repeated.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// The final list of registered events for one run.
///
/// Existing remote events come first in registry order, followed by the
/// events created during the run. This is the only input of code generation
/// and of the configuration rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciledEventSet {
    events: Vec<RemoteEvent>,
}

impl ReconciledEventSet {
    pub fn new(events: Vec<RemoteEvent>) -> Self {
        Self { events }
    }

    /// The set used in placeholder mode.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RemoteEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteEvent> {
        self.events.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &EventName> {
        self.events.iter().map(|event| &event.name)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_inner(self) -> Vec<RemoteEvent> {
        self.events
    }
}

impl FromIterator<RemoteEvent> for ReconciledEventSet {
    fn from_iter<T: IntoIterator<Item = RemoteEvent>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name_rejects_empty() {
        assert!(EventName::new("").is_err());
        assert!(EventName::new("signup").is_ok());
    }

    #[test]
    fn test_event_name_is_case_sensitive() {
        let lower = EventName::new("signup").unwrap();
        let upper = EventName::new("Signup").unwrap();
        assert_ne!(lower, upper);
        assert_eq!(lower, "signup");
    }

    #[test]
    fn test_remote_event_ignores_extra_fields() {
        let json = r#"{"id":"a1","name":"signup","object":"event","created_at":"2023-01-01"}"#;
        let event: RemoteEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "a1");
        assert_eq!(event.name, "signup");
    }

    #[test]
    fn test_remote_event_with_empty_name_is_rejected() {
        let json = r#"{"id":"a1","name":""}"#;
        assert!(serde_json::from_str::<RemoteEvent>(json).is_err());
    }

    #[test]
    fn test_desired_set_filters_blanks_nulls_and_repeats() {
        let desired = DesiredEventSet::from_entries(vec![
            Some("signup"),
            None,
            Some(""),
            Some("login"),
            Some("signup"),
        ]);

        let names: Vec<&str> = desired.iter().map(EventName::as_str).collect();
        assert_eq!(names, vec!["signup", "login"]);
        assert_eq!(desired.skipped(), 3);
    }

    #[test]
    fn test_desired_set_keeps_whitespace_names() {
        let desired = DesiredEventSet::from_names(vec![" "]);
        assert_eq!(desired.len(), 1);
    }
}
