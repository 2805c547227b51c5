//! Till application layer: checkout orchestration against the remote order,
//! customer and receipt collaborators, plus configuration and logging for the
//! `till-app` CLI.

pub mod api;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod context;
pub mod customers;
pub mod observability;
pub mod orders;
pub mod receipts;

#[cfg(test)]
mod test;
