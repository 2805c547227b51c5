//! Checkout errors.

use thiserror::Error;
use till::cart::CartError;

/// Why a checkout did not complete. The cart is left unchanged in every case.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to sell.
    #[error("cart is empty")]
    EmptyCart,

    /// The till has no store configured.
    #[error("no store is configured for this till")]
    MissingStoreContext,

    /// The order API refused or could not take the order.
    #[error("payment failed, please try again: {0}")]
    CheckoutFailed(String),

    /// Cart totals could not be derived.
    #[error("cart totals could not be calculated: {0}")]
    Totals(#[from] CartError),
}
