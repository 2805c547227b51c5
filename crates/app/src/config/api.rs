//! Back-office API Config

use clap::Args;

/// Back-office API settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the back-office API
    #[arg(long = "api-url", env = "TILL_API_URL")]
    pub url: String,

    /// Bearer token sent with every request
    #[arg(long = "api-token", env = "TILL_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "api-timeout-seconds", env = "TILL_API_TIMEOUT_SECONDS", default_value_t = 10u64)]
    pub timeout_seconds: u64,
}
