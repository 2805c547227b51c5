//! Checkout

mod coordinator;
mod errors;

pub use coordinator::CheckoutCoordinator;
pub use errors::CheckoutError;
