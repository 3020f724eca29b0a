//! Persona service configuration.
//!
//! Configuration can be loaded from:
//! - a TOML file (default: ~/.config/htma/personas.toml)
//! - environment variables (HTMA_* prefixed, `.env` honoured)
//!
//! # Example
//!
//! ```rust,no_run
//! use htma_personas::config::PersonaConfig;
//!
//! // Load from default path or fall back to env vars
//! let config = PersonaConfig::load().expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = PersonaConfig::from_file(std::path::Path::new("personas.toml")).expect("Failed to load");
//! ```

use std::env;
use std::path::{Path, PathBuf};

use htma_core::defaults;
use htma_core::PersonaCatalog;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for htma_core::Error {
    fn from(e: ConfigError) -> Self {
        htma_core::Error::Config(e.to_string())
    }
}

/// Tunables of the persona service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Predefined persona given to users on first access.
    pub default_persona_id: String,
    /// Length of each user's recent persona list.
    pub max_recent_personas: usize,
    /// Custom personas a single user may own.
    pub max_custom_personas: usize,
    /// Buffer of the persona event broadcast channel.
    pub event_bus_capacity: usize,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            default_persona_id: defaults::DEFAULT_PERSONA_ID.to_string(),
            max_recent_personas: defaults::MAX_RECENT_PERSONAS,
            max_custom_personas: defaults::MAX_CUSTOM_PERSONAS,
            event_bus_capacity: defaults::EVENT_BUS_CAPACITY,
        }
    }
}

impl PersonaConfig {
    /// Get the default config file path.
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push("htma");
        path.push("personas.toml");
        path
    }

    /// Load from the default path, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading persona config from: {}", path.display());
            Self::from_file(&path)
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            dotenvy::dotenv().ok();
            Self::from_env()
        }
    }

    /// Load configuration from a TOML file with a `[personas]` table.
    ///
    /// `${VAR}` placeholders are replaced from the environment before parsing.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let content = Self::substitute_env_vars(content);

        #[derive(Deserialize)]
        struct TomlRoot {
            #[serde(default)]
            personas: PersonaConfig,
        }

        let root: TomlRoot = toml::from_str(&content)?;
        root.personas.validate()?;
        Ok(root.personas)
    }

    /// Load configuration from `HTMA_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(id) = lookup("HTMA_DEFAULT_PERSONA_ID") {
            config.default_persona_id = id;
        }
        if let Some(n) = parse_usize(&lookup, "HTMA_MAX_RECENT_PERSONAS")? {
            config.max_recent_personas = n;
        }
        if let Some(n) = parse_usize(&lookup, "HTMA_MAX_CUSTOM_PERSONAS")? {
            config.max_custom_personas = n;
        }
        if let Some(n) = parse_usize(&lookup, "HTMA_EVENT_BUS_CAPACITY")? {
            config.event_bus_capacity = n;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !PersonaCatalog::builtin().contains(&self.default_persona_id) {
            return Err(ConfigError::Validation(format!(
                "default_persona_id must name a predefined persona, got: {}",
                self.default_persona_id
            )));
        }
        if self.max_recent_personas == 0 {
            return Err(ConfigError::Validation(
                "max_recent_personas must be at least 1".to_string(),
            ));
        }
        if self.max_custom_personas == 0 {
            return Err(ConfigError::Validation(
                "max_custom_personas must be at least 1".to_string(),
            ));
        }
        if self.event_bus_capacity == 0 {
            return Err(ConfigError::Validation(
                "event_bus_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Substitute `${VAR}` placeholders with environment values.
    ///
    /// Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }
}

fn parse_usize<F>(lookup: &F, key: &str) -> ConfigResult<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}
