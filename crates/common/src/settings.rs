use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use validator::Validate;

use crate::constants::{ENV_PREFIX, ENV_SEPARATOR};
use crate::error::InkyBayError;
use crate::request_signing::RequestSigner;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Clone, Deserialize, Validate)]
pub struct InkyBaySettings {
    /// Origin of the shop API, e.g. `https://app.inkybay.com`.
    #[validate(url)]
    pub base_url: String,
    /// Static key sent in the `authKey` header.
    #[validate(length(min = 1))]
    pub api_key: String,
    /// Shared HMAC secret. Never transmitted.
    #[validate(length(min = 1))]
    pub secret: String,
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
}

impl fmt::Debug for InkyBaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InkyBaySettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub inkybay: InkyBaySettings,
}

impl Settings {
    /// Load settings from a TOML string, overridden by `INKYBAY__` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, a required field is missing,
    /// or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<InkyBayError>> {
        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(Self::environment())
            .build()
            .change_context(InkyBayError::Configuration {
                message: "Failed to parse settings".into(),
            })?;

        Self::finish(config)
    }

    /// Load settings from a TOML file, overridden by `INKYBAY__` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_file(path: &Path) -> Result<Self, Report<InkyBayError>> {
        let content = fs::read_to_string(path).change_context(InkyBayError::Configuration {
            message: format!("Failed to read settings file {}", path.display()),
        })?;
        Self::from_toml(&content).attach(format!("while loading {}", path.display()))
    }

    /// Load settings from `INKYBAY__` variables only.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or validation fails.
    pub fn from_env() -> Result<Self, Report<InkyBayError>> {
        let config = Config::builder()
            .add_source(Self::environment())
            .build()
            .change_context(InkyBayError::Configuration {
                message: "Failed to read settings from environment".into(),
            })?;

        Self::finish(config)
    }

    fn environment() -> Environment {
        Environment::default()
            .prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
    }

    fn finish(config: Config) -> Result<Self, Report<InkyBayError>> {
        let settings: Settings =
            config
                .try_deserialize()
                .change_context(InkyBayError::Configuration {
                    message: "Failed to deserialize settings".into(),
                })?;

        settings
            .validate()
            .change_context(InkyBayError::Configuration {
                message: "Settings validation failed".into(),
            })?;

        Ok(settings)
    }

    /// Build a wall-clock signer from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not usable as an API origin.
    pub fn request_signer(&self) -> Result<RequestSigner, Report<InkyBayError>> {
        RequestSigner::new(&self.inkybay.base_url, self.inkybay.secret.as_bytes())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.inkybay.timeout_secs)
    }
}
