//! Configuration management for glint.
//!
//! Parses `glint.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [preprocess]
//! enabled = true
//! custom_date_fmt = "%d/%m/%Y"
//!
//! [output]
//! wrap_code = true
//!
//! [vars]
//! author = "${USER:-anonymous}"
//! version = 3
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `preprocess.custom_date_fmt`
//! - every value in `[vars]`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use expand::expand_path;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override placeholder substitution.
    pub preprocess_enabled: Option<bool>,
    /// Override the default `custom_date` layout.
    pub custom_date_fmt: Option<String>,
    /// Override code-block wrapping of non-markdown files.
    pub wrap_code: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "glint.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preprocessing configuration.
    pub preprocess: PreprocessConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Default variables as parsed from TOML.
    vars: BTreeMap<String, VarValue>,

    /// Default variables as strings, after env expansion (set after loading).
    #[serde(skip)]
    pub vars_resolved: BTreeMap<String, String>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Preprocessing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Whether `{{ key }}` placeholders are substituted.
    /// When disabled, frontmatter is only stripped.
    pub enabled: bool,
    /// Default strftime layout for the `custom_date` variable.
    pub custom_date_fmt: Option<String>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            custom_date_fmt: None,
        }
    }
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Wrap non-markdown files in a fenced code block.
    pub wrap_code: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { wrap_code: true }
    }
}

/// Scalar value accepted in the `[vars]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum VarValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl VarValue {
    fn into_string(self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => s,
        }
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`vars.author`").
        field: String,
        /// Error message (e.g., "${`USER`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `glint.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(enabled) = settings.preprocess_enabled {
            self.preprocess.enabled = enabled;
        }
        if let Some(fmt) = &settings.custom_date_fmt {
            self.preprocess.custom_date_fmt = Some(fmt.clone());
        }
        if let Some(wrap_code) = settings.wrap_code {
            self.output.wrap_code = wrap_code;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
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

        config.expand_env_vars()?;
        config.resolve_vars();
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_preprocess()?;
        self.validate_vars()?;
        Ok(())
    }

    /// Validate preprocessing configuration.
    fn validate_preprocess(&self) -> Result<(), ConfigError> {
        if let Some(fmt) = &self.preprocess.custom_date_fmt
            && fmt.is_empty()
        {
            return Err(ConfigError::Validation(
                "preprocess.custom_date_fmt cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate default variable names.
    ///
    /// Names must be usable inside a `{{ key }}` placeholder.
    fn validate_vars(&self) -> Result<(), ConfigError> {
        for key in self.vars_resolved.keys() {
            if key.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "vars cannot contain an empty key".to_owned(),
                ));
            }
            if key.trim() != key {
                return Err(ConfigError::Validation(format!(
                    "vars.{key} cannot start or end with whitespace"
                )));
            }
            if key.contains("{{") || key.contains("}}") {
                return Err(ConfigError::Validation(format!(
                    "vars.{key} cannot contain placeholder braces"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref fmt) = self.preprocess.custom_date_fmt {
            self.preprocess.custom_date_fmt =
                Some(expand::expand_env(fmt, "preprocess.custom_date_fmt")?);
        }

        for (key, value) in &mut self.vars {
            if let VarValue::String(s) = value {
                *s = expand::expand_env(s, &format!("vars.{key}"))?;
            }
        }

        Ok(())
    }

    /// Convert raw `[vars]` values to strings.
    fn resolve_vars(&mut self) {
        self.vars_resolved = self
            .vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into_string()))
            .collect();
    }
}
