//! Customers service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomersServiceError {
    #[error("customer lookup failed: {0}")]
    Rejected(String),

    #[error("customer service unavailable: {0}")]
    Transport(#[from] reqwest::Error),
}
