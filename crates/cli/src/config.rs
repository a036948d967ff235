//! Configuration loading and the `config validate` command.
//!
//! Settings come from an optional TOML file merged with environment variables
//! prefixed with `INKYBAY__`. For example, `INKYBAY__INKYBAY__BASE_URL`
//! overrides `inkybay.base_url`. Without a file, the environment alone must
//! supply every required field.

use std::path::Path;

use inkybay_common::settings::Settings;
use inkybay_common::shop::Operation;

use crate::error::CliError;

pub(crate) fn load_settings(file: Option<&Path>) -> Result<Settings, CliError> {
    let settings = match file {
        Some(path) => {
            log::debug!("Loading config from: {}", path.display());
            Settings::from_file(path)
        }
        None => {
            log::debug!("No config file given, reading INKYBAY__ environment variables");
            Settings::from_env()
        }
    };

    settings.map_err(|e| CliError::Config(format!("Failed to load settings: {:?}", e)))
}

/// Validate configuration and print a summary with credentials redacted.
pub fn validate(file: Option<&Path>, verbose: bool) -> Result<(), CliError> {
    let settings = load_settings(file)?;
    let signer = settings.request_signer()?;

    println!("Configuration is valid");
    match file {
        Some(path) => println!("  File: {}", path.display()),
        None => println!("  Source: environment"),
    }
    println!("  Base URL: {}", signer.base_url());
    println!("  Timeout: {}s", settings.inkybay.timeout_secs);
    println!(
        "  API key: [REDACTED] ({} chars)",
        settings.inkybay.api_key.chars().count()
    );

    if verbose {
        println!("\nEndpoints:");
        for op in Operation::ALL {
            println!("  - {}: {}", op, signer.endpoint_url(op)?);
        }
    }

    Ok(())
}
