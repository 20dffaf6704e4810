//! Configuration loading and CLI merging
//!
//! Config values layer the same way the CLI expects: an explicit
//! `--config` path wins, else `./pairset.toml`, else
//! `<config dir>/pairset/config.toml`, else built-in defaults. CLI
//! arguments override whatever the file provides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pair::{CollisionPolicy, PairOptions};

/// Config filename looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "pairset.toml";

/// Config path under the user config directory
pub const USER_CONFIG_SUBPATH: &str = "pairset/config.toml";

/// Config loading error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pairing: PairingConfig,
}

/// `[pairing]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// Catalog collision policy
    pub collision: CollisionPolicy,
    /// Sort directory entries by filename before processing
    pub sort_entries: bool,
    /// Maintain a resume journal
    pub journal: bool,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            collision: CollisionPolicy::Overwrite,
            sort_entries: true,
            journal: false,
        }
    }
}

impl Config {
    /// Load config from the standard locations, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load_from_path(local);
        }
        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join(USER_CONFIG_SUBPATH);
            if user.exists() {
                return Self::load_from_path(&user);
            }
        }
        Ok(Self::default())
    }

    /// Load config from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Merge config file values with CLI arguments (CLI takes precedence).
    pub fn merge_with_cli(&self, overrides: &CliOverrides) -> PairOptions {
        PairOptions {
            collision: overrides.collision.unwrap_or(self.pairing.collision),
            sort_entries: overrides.sort_entries.unwrap_or(self.pairing.sort_entries),
            journal: overrides.journal.unwrap_or(self.pairing.journal),
        }
    }
}

/// Values the CLI explicitly set; `None` leaves the config file value in
/// effect.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub collision: Option<CollisionPolicy>,
    pub sort_entries: Option<bool>,
    pub journal: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.pairing.collision, CollisionPolicy::Overwrite);
        assert!(config.pairing.sort_entries);
        assert!(!config.pairing.journal);
    }

    #[test]
    fn test_config_parse_full() {
        let toml_text = r#"
            [pairing]
            collision = "reject"
            sort_entries = false
            journal = true
        "#;
        let config: Config = toml::from_str(toml_text).unwrap();
        assert_eq!(config.pairing.collision, CollisionPolicy::Reject);
        assert!(!config.pairing.sort_entries);
        assert!(config.pairing.journal);
    }

    #[test]
    fn test_config_parse_partial_uses_defaults() {
        let toml_text = r#"
            [pairing]
            journal = true
        "#;
        let config: Config = toml::from_str(toml_text).unwrap();
        assert_eq!(config.pairing.collision, CollisionPolicy::Overwrite);
        assert!(config.pairing.sort_entries);
        assert!(config.pairing.journal);
    }

    #[test]
    fn test_config_parse_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.pairing.sort_entries);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[pairing]\ncollision = \"reject\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.pairing.collision, CollisionPolicy::Reject);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let result = Config::load_from_path(Path::new("/nonexistent/pairset.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_from_path_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not [valid toml").unwrap();

        let result = Config::load_from_path(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_merge_with_cli_no_overrides() {
        let config = Config::default();
        let options = config.merge_with_cli(&CliOverrides::new());
        assert_eq!(options.collision, CollisionPolicy::Overwrite);
        assert!(options.sort_entries);
        assert!(!options.journal);
    }

    #[test]
    fn test_merge_with_cli_takes_precedence() {
        let toml_text = r#"
            [pairing]
            collision = "overwrite"
            sort_entries = true
        "#;
        let config: Config = toml::from_str(toml_text).unwrap();

        let overrides = CliOverrides {
            collision: Some(CollisionPolicy::Reject),
            sort_entries: Some(false),
            journal: Some(true),
        };
        let options = config.merge_with_cli(&overrides);
        assert_eq!(options.collision, CollisionPolicy::Reject);
        assert!(!options.sort_entries);
        assert!(options.journal);
    }
}
