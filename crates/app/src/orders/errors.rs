//! Orders service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// The order API refused the order. Carries its message verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The order API could not be reached or answered with an unreadable body.
    #[error("order service unavailable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl OrdersServiceError {
    /// Message to show the cashier.
    pub fn into_message(self) -> String {
        match self {
            Self::Rejected(message) => message,
            transport @ Self::Transport(_) => transport.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_unmodified() {
        let error = OrdersServiceError::Rejected("Card declined".to_string());

        assert_eq!(error.into_message(), "Card declined");
    }
}
