//! TypeScript artifact generation.
//!
//! [`generate`] renders three sources from a [`ReconciledEventSet`]:
//!
//! - `types.ts`: the `RegisteredEventName` union of string literals
//! - `mappings.ts`: `registeredEventMappings`, event name to Fathom event id
//! - `utilities.ts`: helpers resolving a registered name to its id
//!
//! Rendering is a pure function of the event list. The same list in the same
//! order always produces byte-identical sources, and the empty list produces
//! sources that still type-check (`never` union, empty mapping).

use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};
use crate::events::{ReconciledEventSet, RemoteEvent};

pub const TYPES_FILE: &str = "types.ts";
pub const MAPPINGS_FILE: &str = "mappings.ts";
pub const UTILITIES_FILE: &str = "utilities.ts";

const TYPE_NAME: &str = "RegisteredEventName";
const MAPPINGS_NAME: &str = "registeredEventMappings";

const HEADER: &str = "// This file is generated by fathom-sync. Do not edit it manually.\n";

/// The three generated sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    pub types_source: String,
    pub mappings_source: String,
    pub utilities_source: String,
}

impl GeneratedArtifacts {
    /// File name and content of each artifact, in write order.
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (TYPES_FILE, self.types_source.as_str()),
            (MAPPINGS_FILE, self.mappings_source.as_str()),
            (UTILITIES_FILE, self.utilities_source.as_str()),
        ]
    }

    /// Writes every artifact into `dir`, creating it recursively if needed.
    ///
    /// Returns the written paths in write order.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|e| Error::persistence(dir, e))?;

        let mut written = Vec::with_capacity(3);
        for (file_name, content) in self.files() {
            let path = dir.join(file_name);
            fs::write(&path, content).map_err(|e| Error::persistence(&path, e))?;
            debug!("Wrote {} ({} bytes)", path.display(), content.len());
            written.push(path);
        }
        Ok(written)
    }
}

/// Renders all three artifacts for `events`.
pub fn generate(events: &ReconciledEventSet) -> GeneratedArtifacts {
    let unique = unique_events(events);
    GeneratedArtifacts {
        types_source: render_types(&unique),
        mappings_source: render_mappings(&unique),
        utilities_source: render_utilities(),
    }
}

/// First occurrence of every name, in input order.
fn unique_events(events: &ReconciledEventSet) -> Vec<&RemoteEvent> {
    let mut seen = HashSet::new();
    events
        .iter()
        .filter(|event| seen.insert(event.name.as_str()))
        .collect()
}

fn render_types(events: &[&RemoteEvent]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    if events.is_empty() {
        out.push_str(&format!("export type {TYPE_NAME} = never;\n"));
        return out;
    }

    out.push_str(&format!("export type {TYPE_NAME} =\n"));
    let last = events.len() - 1;
    for (index, event) in events.iter().enumerate() {
        let terminator = if index == last { ";" } else { "" };
        out.push_str(&format!(
            "  | {}{terminator}\n",
            string_literal(event.name.as_str())
        ));
    }
    out
}

fn render_mappings(events: &[&RemoteEvent]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str(&format!("import type {{ {TYPE_NAME} }} from \"./types\";\n\n"));

    if events.is_empty() {
        out.push_str(&format!(
            "export const {MAPPINGS_NAME}: Record<{TYPE_NAME}, string> = {{}};\n"
        ));
        return out;
    }

    out.push_str(&format!(
        "export const {MAPPINGS_NAME}: Record<{TYPE_NAME}, string> = {{\n"
    ));
    for event in events {
        out.push_str(&format!(
            "  {}: {},\n",
            string_literal(event.name.as_str()),
            string_literal(&event.id)
        ));
    }
    out.push_str("};\n");
    out
}

fn render_utilities() -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str(&format!("import type {{ {TYPE_NAME} }} from \"./types\";\n"));
    out.push_str(&format!("import {{ {MAPPINGS_NAME} }} from \"./mappings\";\n\n"));

    out.push_str("/**\n");
    out.push_str(" * Returns the Fathom event id registered for `eventName`.\n");
    out.push_str(" */\n");
    out.push_str(&format!(
        "export const resolveRegisteredEvent = (eventName: {TYPE_NAME}): string =>\n"
    ));
    out.push_str(&format!("  {MAPPINGS_NAME}[eventName];\n\n"));

    out.push_str("/**\n");
    out.push_str(" * Narrows an arbitrary string to a registered event name.\n");
    out.push_str(" */\n");
    out.push_str(&format!(
        "export const isRegisteredEvent = (eventName: string): eventName is {TYPE_NAME} =>\n"
    ));
    out.push_str(&format!(
        "  Object.prototype.hasOwnProperty.call({MAPPINGS_NAME}, eventName);\n"
    ));
    out
}

/// Double-quoted TypeScript string literal for `value`.
fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventName;

    fn event(id: &str, name: &str) -> RemoteEvent {
        RemoteEvent::new(id, EventName::new(name).unwrap())
    }

    fn signup_login() -> ReconciledEventSet {
        ReconciledEventSet::new(vec![event("a1", "signup"), event("b2", "login")])
    }

    #[test]
    fn test_types_preserve_order() {
        let artifacts = generate(&signup_login());
        assert!(artifacts.types_source.ends_with(
            "export type RegisteredEventName =\n  | \"signup\"\n  | \"login\";\n"
        ));
    }

    #[test]
    fn test_mappings_pair_names_with_ids() {
        let artifacts = generate(&signup_login());
        assert!(artifacts
            .mappings_source
            .contains("  \"signup\": \"a1\",\n  \"login\": \"b2\",\n};\n"));
    }

    #[test]
    fn test_empty_set_renders_placeholders() {
        let artifacts = generate(&ReconciledEventSet::empty());

        assert!(artifacts
            .types_source
            .contains("export type RegisteredEventName = never;"));
        assert!(artifacts.mappings_source.contains(
            "export const registeredEventMappings: Record<RegisteredEventName, string> = {};"
        ));
        assert!(artifacts
            .utilities_source
            .contains("export const resolveRegisteredEvent = (eventName: RegisteredEventName)"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = generate(&signup_login());
        let second = generate(&signup_login());
        assert_eq!(first, second);
    }

    #[test]
    fn test_order_changes_output() {
        let reversed = ReconciledEventSet::new(vec![event("b2", "login"), event("a1", "signup")]);
        assert_ne!(generate(&signup_login()), generate(&reversed));
    }

    #[test]
    fn test_repeated_names_emitted_once() {
        let events = ReconciledEventSet::new(vec![event("a1", "signup"), event("a2", "signup")]);
        let artifacts = generate(&events);

        assert_eq!(artifacts.types_source.matches("\"signup\"").count(), 1);
        assert!(artifacts.mappings_source.contains("\"signup\": \"a1\""));
        assert!(!artifacts.mappings_source.contains("a2"));
    }

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(string_literal("a\\b"), "\"a\\\\b\"");
        assert_eq!(string_literal("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(string_literal("\u{0007}"), "\"\\u0007\"");
        assert_eq!(string_literal("café 🎉"), "\"café 🎉\"");
    }

    #[test]
    fn test_write_to_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out").join("fathom");

        let written = generate(&signup_login()).write_to(&out_dir).unwrap();

        assert_eq!(
            written,
            vec![
                out_dir.join(TYPES_FILE),
                out_dir.join(MAPPINGS_FILE),
                out_dir.join(UTILITIES_FILE)
            ]
        );
        let types = fs::read_to_string(out_dir.join(TYPES_FILE)).unwrap();
        assert!(types.contains("\"login\""));
    }
}
