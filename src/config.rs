/// Configuration management for linepatch
///
/// linepatch stores configuration in ~/.linepatch/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = r#"# linepatch configuration file

[workspace]
# Default workspace root; target paths outside it are rejected.
# The --root flag takes precedence. Defaults to the current directory.
#root = "/path/to/workspace"

[backup]
# Create a sibling backup before every destructive write (default: true)
#enabled = true

[logging]
# Write operation logs to ~/.linepatch/linepatch.log (default: false)
#debug = false
"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub backup: BackupConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Default workspace root when --root is not given
    #[serde(default)]
    pub root: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Create backups before destructive writes
    #[serde(default = "default_backup_enabled")]
    pub enabled: Option<bool>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: Some(true),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable debug logging to file
    #[serde(default)]
    pub debug: Option<bool>,
}

fn default_backup_enabled() -> Option<bool> {
    Some(true)
}

/// Get the configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".linepatch").join("config.toml"))
}

impl Config {
    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self> {
        let path = config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Write the commented default template if no config exists yet.
    pub fn write_default() -> Result<PathBuf> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        }
        Ok(path)
    }

    pub fn backup_enabled(&self) -> bool {
        self.backup.enabled.unwrap_or(true)
    }

    pub fn debug_logging(&self) -> bool {
        self.logging.debug.unwrap_or(false)
    }
}
