//! Locating the configuration file, the source root and the output directory.

use log::debug;
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};

/// Configuration file names, in lookup order within a single directory.
pub const CONFIGURATION_FILE_NAMES: &[&str] = &[".fathomrc", ".fathomrc.json", ".fathom.json"];

/// Name of the directory that anchors generated output.
pub const SOURCE_DIR_NAME: &str = "src";

/// Output directory used when neither the command line nor the configuration
/// names one, relative to the source root.
pub const DEFAULT_OUT_DIR: &str = "out/fathom";

/// Walks up from `start_dir` and returns the first configuration file found.
///
/// Within one directory `.fathomrc` wins over `.fathomrc.json`, which wins
/// over `.fathom.json`. A closer directory always wins over a parent.
pub fn discover_configuration(start_dir: &Path) -> Result<PathBuf> {
    for dir in start_dir.ancestors() {
        for file_name in CONFIGURATION_FILE_NAMES {
            let candidate = dir.join(file_name);
            if candidate.is_file() {
                debug!("Found configuration at {}", candidate.display());
                return Ok(candidate);
            }
        }
    }
    Err(Error::ConfigurationMissing(start_dir.to_path_buf()))
}

/// Returns the nearest `src` directory at or above `start_dir`.
///
/// Falls back to `start_dir` itself when no ancestor has a `src` directory.
pub fn discover_source_root(start_dir: &Path) -> PathBuf {
    start_dir
        .ancestors()
        .map(|dir| dir.join(SOURCE_DIR_NAME))
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| {
            debug!(
                "No {} directory above {}, using it as source root",
                SOURCE_DIR_NAME,
                start_dir.display()
            );
            start_dir.to_path_buf()
        })
}

/// Joins `out_dir` (or [`DEFAULT_OUT_DIR`]) to the source root.
///
/// Leading and trailing slashes of `out_dir` are stripped so the result always
/// stays below `source_root`. Blank values fall back to the default.
pub fn resolve_output_dir(source_root: &Path, out_dir: Option<&str>) -> PathBuf {
    let relative = out_dir
        .map(|dir| dir.trim_matches('/'))
        .filter(|dir| !dir.is_empty())
        .unwrap_or(DEFAULT_OUT_DIR);
    source_root.join(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discovers_configuration_in_parent() {
        let root = tempdir().unwrap();
        let nested = root.path().join("packages").join("web");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join(".fathomrc"), "{}").unwrap();

        let found = discover_configuration(&nested).unwrap();
        assert_eq!(found, root.path().join(".fathomrc"));
    }

    #[test]
    fn test_closest_configuration_wins() {
        let root = tempdir().unwrap();
        let nested = root.path().join("app");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join(".fathomrc"), "{}").unwrap();
        fs::write(nested.join(".fathom.json"), "{}").unwrap();

        assert_eq!(
            discover_configuration(&nested).unwrap(),
            nested.join(".fathom.json")
        );
    }

    #[test]
    fn test_file_name_precedence_within_directory() {
        let root = tempdir().unwrap();
        fs::write(root.path().join(".fathom.json"), "{}").unwrap();
        fs::write(root.path().join(".fathomrc.json"), "{}").unwrap();

        assert_eq!(
            discover_configuration(root.path()).unwrap(),
            root.path().join(".fathomrc.json")
        );
    }

    #[test]
    fn test_directory_named_like_configuration_is_ignored() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join(".fathomrc")).unwrap();
        fs::write(root.path().join(".fathom.json"), "{}").unwrap();

        assert_eq!(
            discover_configuration(root.path()).unwrap(),
            root.path().join(".fathom.json")
        );
    }

    #[test]
    fn test_source_root_found_above() {
        let root = tempdir().unwrap();
        let src = root.path().join("src");
        let nested = src.join("components");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover_source_root(&nested), src);
        assert_eq!(discover_source_root(root.path()), src);
    }

    #[test]
    fn test_source_root_falls_back_to_start() {
        let root = tempdir().unwrap();
        let lib = root.path().join("lib");
        fs::create_dir_all(&lib).unwrap();

        // tempdir ancestors (e.g. /tmp) are not expected to contain `src`.
        let resolved = discover_source_root(&lib);
        assert!(resolved == lib || resolved.ends_with(SOURCE_DIR_NAME));
    }

    #[test]
    fn test_resolve_output_dir() {
        let root = Path::new("/project/src");
        assert_eq!(resolve_output_dir(root, None), root.join("out/fathom"));
        assert_eq!(
            resolve_output_dir(root, Some("/generated/fathom/")),
            root.join("generated/fathom")
        );
        assert_eq!(resolve_output_dir(root, Some("//")), root.join("out/fathom"));
        assert_eq!(resolve_output_dir(root, Some("")), root.join("out/fathom"));
    }
}
