//! Customers

mod errors;
mod http;
mod service;

pub use errors::CustomersServiceError;
pub use http::{CustomerRecord, HttpCustomersService};
pub use service::*;
