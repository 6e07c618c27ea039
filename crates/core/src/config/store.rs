//! Writing the reconciled event list back into the configuration file.

use log::info;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::model::Configuration;
use crate::errors::{Error, Result};
use crate::events::ReconciledEventSet;

/// Rewrites the configuration file at `path` with `events` replaced by the
/// names of `final_events`, in merged order.
///
/// The new content goes to a sibling temporary file which is then renamed
/// over `path`, so readers see either the old or the new file.
pub fn persist(
    path: &Path,
    existing: &Configuration,
    final_events: &ReconciledEventSet,
) -> Result<()> {
    let document = Value::Object(existing.document_with_events(final_events));
    let mut content =
        serde_json::to_string_pretty(&document).map_err(|e| Error::persistence(path, e))?;
    content.push('\n');

    let temp_path = temp_path_for(path);
    if let Err(e) = fs::write(&temp_path, &content) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::persistence(&temp_path, e));
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::persistence(path, e));
    }

    info!(
        "Configuration {} updated with {} events",
        path.display(),
        final_events.len()
    );
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fathomrc".to_string());
    path.with_file_name(format!("{file_name}.tmp"))
}
