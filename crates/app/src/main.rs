//! Till point-of-sale CLI

use std::process::ExitCode;

use tracing::error;

use till_app::{cli, config::Cli, observability};

#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match Cli::load() {
        Ok(config) => config,
        Err(error) => error.exit(),
    };

    if let Err(error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("{error}");
        }

        return ExitCode::FAILURE;
    }

    match cli::run(config.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "command failed");

            ExitCode::FAILURE
        }
    }
}
