//! Till CLI configuration

use clap::{Parser, Subcommand};

use crate::{cli::checkout::CheckoutArgs, config::observability::LoggingConfig};

pub mod api;
pub mod observability;
pub mod store;

/// Till point-of-sale CLI configuration
#[derive(Debug, Parser)]
#[command(name = "till-app", about = "Till point-of-sale CLI", long_about = None)]
pub struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check out a cart described by a YAML fixture.
    Checkout(CheckoutArgs),
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
