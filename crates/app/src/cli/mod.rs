//! CLI commands.

use thiserror::Error;
use till::fixtures::FixtureError;

use crate::{checkout::CheckoutError, config::Command, context::AppInitError};

pub mod checkout;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The cart fixture could not be loaded.
    #[error("failed to load cart: {0}")]
    Fixture(#[from] FixtureError),

    /// Services could not be set up.
    #[error(transparent)]
    Init(#[from] AppInitError),

    /// Checkout did not complete.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Run a CLI command.
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Checkout(args) => checkout::run(&args).await,
    }
}
