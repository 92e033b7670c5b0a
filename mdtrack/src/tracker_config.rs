//! Tracker configuration from mdtrack.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tracker configuration loaded from an optional mdtrack.toml at the scan root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// File extensions treated as markdown sources
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names skipped entirely during scans
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// Where external plumbing persists per-item tracking status
    ///
    /// The core only produces item IDs; the store itself is managed by the
    /// consuming application.
    #[serde(default)]
    pub status_store_path: Option<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

fn default_skip_dirs() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        "target".to_string(),
    ]
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            skip_dirs: default_skip_dirs(),
            status_store_path: None,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from an mdtrack.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the mdtrack.toml configuration file
    ///
    /// # Returns
    /// * `Ok(TrackerConfig)` - Successfully loaded configuration
    /// * `Err(TrackerConfigError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TrackerConfigError> {
        let content = fs::read_to_string(&path).map_err(TrackerConfigError::IoError)?;

        let config: TrackerConfig =
            toml::from_str(&content).map_err(TrackerConfigError::ParseError)?;

        Ok(config)
    }

    /// Save configuration to an mdtrack.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the mdtrack.toml file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(TrackerConfigError)` - Error serializing or writing the file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TrackerConfigError> {
        let content = toml::to_string_pretty(self).map_err(TrackerConfigError::SerializeError)?;

        fs::write(&path, content).map_err(TrackerConfigError::IoError)?;

        Ok(())
    }

    /// Whether a file path has one of the configured markdown extensions
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Whether a directory name is excluded from scans
    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == name)
    }
}

/// Errors that can occur when loading or saving tracker configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum TrackerConfigError {
    /// IO error when reading or writing file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    SerializeError(toml::ser::Error),
}

impl std::fmt::Display for TrackerConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerConfigError::IoError(e) => write!(f, "IO error: {}", e),
            TrackerConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            TrackerConfigError::SerializeError(e) => write!(f, "TOML serialize error: {}", e),
        }
    }
}

impl std::error::Error for TrackerConfigError {}
