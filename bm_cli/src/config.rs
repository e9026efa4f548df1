//! CLI configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use bracket_master::{Layout, MatchType, SeedMode, TournamentConfig};
use std::{fmt::Display, path::PathBuf, str::FromStr};

/// Default location of the tournament book
pub const DEFAULT_DATA_FILE: &str = "bracket_master.json";

/// Complete CLI configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Path of the JSON tournament book
    pub data_file: PathBuf,
    /// Settings applied to newly created tournaments
    pub defaults: TournamentDefaults,
}

/// Settings for new tournaments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TournamentDefaults {
    pub match_type: MatchType,
    pub seed_mode: SeedMode,
    pub layout: Layout,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `data_override` - Optional book path override (from `--data`)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to a value that does not parse
    pub fn from_env(data_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_lookup(data_override, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(data_override: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_file = data_override
            .or_else(|| lookup("BRACKET_DATA_FILE").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let defaults = TournamentDefaults {
            match_type: parse_var_or(&lookup, "BRACKET_DEFAULT_MATCH_TYPE", MatchType::default())?,
            seed_mode: parse_var_or(&lookup, "BRACKET_DEFAULT_SEED_MODE", SeedMode::default())?,
            layout: parse_var_or(&lookup, "BRACKET_DEFAULT_LAYOUT", Layout::default())?,
        };

        Ok(CliConfig {
            data_file,
            defaults,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "BRACKET_DATA_FILE".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.data_file.is_dir() {
            return Err(ConfigError::Invalid {
                var: "BRACKET_DATA_FILE".to_string(),
                reason: format!("{} is a directory", self.data_file.display()),
            });
        }

        Ok(())
    }

    /// Tournament settings for a new tournament called `name`
    pub fn tournament_config(&self, name: &str) -> TournamentConfig {
        TournamentConfig::new(name)
            .with_match_type(self.defaults.match_type)
            .with_seed_mode(self.defaults.seed_mode)
            .with_layout(self.defaults.layout)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse a variable if set, falling back to `default` when it is absent
fn parse_var_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}
