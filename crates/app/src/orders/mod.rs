//! Orders

mod errors;
mod http;
pub mod models;
mod service;

pub use errors::OrdersServiceError;
pub use http::HttpOrdersService;
pub use service::*;
