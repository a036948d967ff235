//! InkyBay CLI for signed shop lookups.
//!
//! This tool provides commands for:
//! - Signing a request body and showing the resulting headers (no network)
//! - Sending signed `search`, `history` and `info` calls to InkyBay
//! - Validating configuration

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::LevelFilter;

use inkybay_common::logging::init_logging;
use inkybay_common::shop::{SearchQuery, ShopQuery, DEFAULT_SEARCH_TYPE};

mod client;
mod config;
mod error;
mod shop;

use client::InkyBayClient;
use error::CliError;

#[derive(Parser)]
#[command(name = "inkyctl")]
#[command(about = "Signed requests against the InkyBay shop API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the TOML configuration file (environment only when omitted)
    #[arg(short, long, global = true, env = "INKYBAY_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a body and print the envelope without sending it
    Sign {
        /// Upstream operation: search, history or info
        #[arg(long, short)]
        operation: String,

        /// JSON request body, signed byte-for-byte
        #[arg(long, short)]
        body: String,

        /// Unix seconds to sign at instead of the current time
        #[arg(long)]
        auth_time: Option<u64>,
    },

    /// Send a signed request with a raw JSON body
    Call {
        /// Upstream operation: search, history or info
        #[arg(long, short)]
        operation: String,

        /// JSON request body, sent byte-for-byte
        #[arg(long, short)]
        body: String,
    },

    /// Search shops
    Search {
        /// Search key
        #[arg(long)]
        srckey: String,

        /// Search type
        #[arg(long = "type", default_value = DEFAULT_SEARCH_TYPE)]
        search_type: String,
    },

    /// Fetch a shop's history
    History {
        /// Shop identifier
        #[arg(long)]
        shop: String,
    },

    /// Fetch a shop's info
    Info {
        /// Shop identifier
        #[arg(long)]
        shop: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate settings and print a redacted summary
    Validate {
        /// Configuration file to validate instead of the global `--config`
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = init_logging(level) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn connect(config_path: Option<&Path>) -> Result<InkyBayClient, CliError> {
    let settings = config::load_settings(config_path)?;
    InkyBayClient::from_settings(&settings)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Sign {
            operation,
            body,
            auth_time,
        } => {
            let settings = config::load_settings(config_path)?;
            shop::sign(&settings, &operation, &body, auth_time)
        }
        Commands::Call { operation, body } => {
            shop::call(&connect(config_path)?, &operation, &body)
        }
        Commands::Search {
            srckey,
            search_type,
        } => {
            let query = ShopQuery::from(SearchQuery::new(srckey).with_type(search_type));
            shop::query(&connect(config_path)?, &query)
        }
        Commands::History { shop: shop_id } => {
            shop::query(&connect(config_path)?, &ShopQuery::history(shop_id))
        }
        Commands::Info { shop: shop_id } => {
            shop::query(&connect(config_path)?, &ShopQuery::info(shop_id))
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { file } => {
                config::validate(file.as_deref().or(config_path), cli.verbose)
            }
        },
    }
}
