//! The project configuration file (`.fathomrc` and friends).

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};
use crate::events::{DesiredEventSet, ReconciledEventSet};

const EVENTS_KEY: &str = "events";
const OUT_DIR_KEY: &str = "outDir";

/// Parsed configuration file.
///
/// The whole JSON document is kept so that a rewrite only touches `events`;
/// every other key keeps its value and its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    path: PathBuf,
    document: Map<String, Value>,
    events: Vec<Option<String>>,
    out_dir: Option<String>,
}

impl Configuration {
    /// Reads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::parse(path, &raw)
    }

    /// Parses `raw` as the content of the configuration file at `path`.
    pub fn parse(path: &Path, raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| Error::malformed(path, format!("invalid JSON: {e}")))?;

        let Value::Object(document) = value else {
            return Err(Error::malformed(path, "expected a JSON object"));
        };

        let events = match document.get(EVENTS_KEY) {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| match entry {
                    Value::String(name) => Ok(Some(name.clone())),
                    Value::Null => Ok(None),
                    other => Err(Error::malformed(
                        path,
                        format!("event entries must be strings, found {other}"),
                    )),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(Error::malformed(path, "`events` must be an array")),
            None => return Err(Error::malformed(path, "missing `events` field")),
        };

        let out_dir = match document.get(OUT_DIR_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(dir)) => Some(dir.clone()),
            Some(_) => return Err(Error::malformed(path, "`outDir` must be a string")),
        };

        Ok(Self {
            path: path.to_path_buf(),
            document,
            events,
            out_dir,
        })
    }

    /// Builds a configuration that has not been read from disk.
    #[cfg(test)]
    pub fn new(path: impl Into<PathBuf>, events: Vec<String>, out_dir: Option<String>) -> Self {
        let mut document = Map::new();
        document.insert(
            EVENTS_KEY.to_string(),
            Value::Array(events.iter().cloned().map(Value::String).collect()),
        );
        if let Some(dir) = &out_dir {
            document.insert(OUT_DIR_KEY.to_string(), Value::String(dir.clone()));
        }
        Self {
            path: path.into(),
            document,
            events: events.into_iter().map(Some).collect(),
            out_dir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw `events` entries, `null` entries included.
    pub fn events(&self) -> &[Option<String>] {
        &self.events
    }

    pub fn desired_events(&self) -> DesiredEventSet {
        DesiredEventSet::from_entries(self.events.iter().cloned())
    }

    pub fn out_dir(&self) -> Option<&str> {
        self.out_dir.as_deref()
    }

    /// Value of any other top-level key.
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// The document with `events` replaced by the names of `final_events`.
    pub fn document_with_events(&self, final_events: &ReconciledEventSet) -> Map<String, Value> {
        let mut document = self.document.clone();
        document.insert(
            EVENTS_KEY.to_string(),
            Value::Array(
                final_events
                    .names()
                    .map(|name| Value::String(name.to_string()))
                    .collect(),
            ),
        );
        document
    }
}
