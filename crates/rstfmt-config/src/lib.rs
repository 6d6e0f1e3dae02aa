//! Configuration management for rstfmt.
//!
//! Parses `rstfmt.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Programmatic overrides can be applied during load via [`ConfigOverrides`].
//!
//! ## Example
//!
//! ```toml
//! [extensions]
//! default_domain = "cpp"
//! plugins = ["sphinx-tabs", "breathe"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    /// Override the default domain.
    pub default_domain: Option<String>,
    /// Override the list of enabled optional plugins.
    pub plugins: Option<Vec<String>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rstfmt.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markup extension configuration.
    pub extensions: ExtensionsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markup extension configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtensionsConfig {
    /// Domain whose directives and roles resolve without a `domain:` prefix.
    pub default_domain: String,
    /// Optional plugins to enable.
    ///
    /// `None` enables every plugin compiled into the build.
    pub plugins: Option<Vec<String>>,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            default_domain: "py".to_owned(),
            plugins: None,
        }
    }
}

impl ExtensionsConfig {
    /// Whether the named plugin is allowed by this configuration.
    #[must_use]
    pub fn allows_plugin(&self, name: &str) -> bool {
        self.plugins
            .as_ref()
            .is_none_or(|plugins| plugins.iter().any(|p| p == name))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a field to be a simple name (alphanumerics, hyphens, underscores).
fn require_simple_name(value: &str, field: &str) -> Result<(), ConfigError> {
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "{field} must contain only letters, digits, hyphens and underscores, got {value:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rstfmt.toml` in current directory and parents.
    ///
    /// Overrides are applied after loading and validated together with the
    /// file contents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(domain) = &overrides.default_domain {
            self.extensions.default_domain.clone_from(domain);
        }
        if let Some(plugins) = &overrides.plugins {
            self.extensions.plugins = Some(plugins.clone());
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered configuration file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_extensions()
    }

    fn validate_extensions(&self) -> Result<(), ConfigError> {
        let extensions = &self.extensions;
        require_non_empty(&extensions.default_domain, "extensions.default_domain")?;
        require_simple_name(&extensions.default_domain, "extensions.default_domain")?;

        if let Some(plugins) = &extensions.plugins {
            for (idx, plugin) in plugins.iter().enumerate() {
                require_non_empty(plugin, "extensions.plugins")?;
                if plugins[..idx].contains(plugin) {
                    return Err(ConfigError::Validation(format!(
                        "extensions.plugins lists {plugin:?} more than once"
                    )));
                }
            }
        }

        Ok(())
    }
}
