//! Directory scan pipeline
//!
//! Discovers markdown sources under a root directory and parses each one
//! into an independent [`ParsedDocument`] snapshot. Discovery honors the
//! optional mdtrack.toml at the root (extensions to include, directories
//! to skip); parsing is per-file and embarrassingly parallel, so the
//! `parallel` feature maps files across a rayon pool.

use crate::document_model::{parse_document, ParsedDocument};
use crate::tracker_config::{TrackerConfig, TrackerConfigError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scan a directory tree and parse every tracked markdown file
///
/// # Parameters
/// * `root` - Root directory containing markdown files (and optionally an
///   mdtrack.toml)
///
/// # Returns
/// * `Ok(Vec<ParsedDocument>)` - One snapshot per discovered file, in
///   discovery order
/// * `Err(ScanError)` - Error loading configuration or reading a file
pub fn scan_sources(root: &Path) -> Result<Vec<ParsedDocument>, ScanError> {
    let config = load_config(root)?;
    let paths = discover_markdown_files(root, &config);

    log::info!(
        "scanning {}: {} markdown files discovered",
        root.display(),
        paths.len()
    );

    #[cfg(feature = "parallel")]
    let documents: Result<Vec<_>, _> = paths.par_iter().map(|path| parse_file(path)).collect();

    #[cfg(not(feature = "parallel"))]
    let documents: Result<Vec<_>, _> = paths.iter().map(|path| parse_file(path)).collect();

    documents
}

/// Load the root's mdtrack.toml, falling back to defaults when absent
fn load_config(root: &Path) -> Result<TrackerConfig, ScanError> {
    let config_path = root.join("mdtrack.toml");
    if !config_path.exists() {
        return Ok(TrackerConfig::default());
    }

    TrackerConfig::load(&config_path)
        .map_err(|e| ScanError::ConfigError(config_path, Box::new(e)))
}

/// Collect matching file paths in discovery order
fn discover_markdown_files(root: &Path, config: &TrackerConfig) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            // Never filter the root itself; skip configured directories.
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map_or(true, |name| !config.is_skipped_dir(name))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file() && config.matches_extension(entry.path()))
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// Read and parse a single markdown file
fn parse_file(path: &Path) -> Result<ParsedDocument, ScanError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ScanError::IoError(path.to_path_buf(), e))?;

    Ok(parse_document(&content, Some(path)))
}

/// Scan errors
#[derive(Error, Debug)]
pub enum ScanError {
    /// IO error reading a discovered file
    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),

    /// Error loading the scan root's configuration
    #[error("Config error loading {path}: {source}", path = .0.display(), source = .1)]
    ConfigError(PathBuf, #[source] Box<TrackerConfigError>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_discovers_and_parses_markdown() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "todo.md", "# Tasks\n\n- [ ] one\n- [x] two\n");
        write(dir.path(), "notes/plan.md", "## Plan\n\n- step\n");
        write(dir.path(), "ignore.txt", "- not markdown\n");

        let documents = scan_sources(dir.path()).unwrap();

        assert_eq!(documents.len(), 2);
        let total: usize = documents.iter().map(|d| d.item_count).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_scan_skips_configured_directories() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "tracked.md", "- [ ] visible\n");
        write(dir.path(), "node_modules/buried.md", "- [ ] hidden\n");

        let documents = scan_sources(dir.path()).unwrap();

        assert_eq!(documents.len(), 1);
        assert!(documents[0]
            .source_path
            .as_ref()
            .unwrap()
            .ends_with("tracked.md"));
    }

    #[test]
    fn test_scan_honors_config_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "mdtrack.toml", "extensions = [\"mdown\"]\n");
        write(dir.path(), "skipped.md", "- [ ] nope\n");
        write(dir.path(), "taken.mdown", "- [ ] yes\n");

        let documents = scan_sources(dir.path()).unwrap();

        assert_eq!(documents.len(), 1);
        assert!(documents[0]
            .source_path
            .as_ref()
            .unwrap()
            .ends_with("taken.mdown"));
    }

    #[test]
    fn test_scan_reports_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "mdtrack.toml", "extensions = 42\n");

        let err = scan_sources(dir.path()).unwrap_err();

        assert!(matches!(err, ScanError::ConfigError(_, _)));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();

        let documents = scan_sources(dir.path()).unwrap();

        assert!(documents.is_empty());
    }
}
