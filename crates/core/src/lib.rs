//! Till
//!
//! Cart and transaction lifecycle engine for a retail point of sale: an
//! in-memory cart with derived totals, line discounts, completed-sale records
//! and the void/return ledger.

pub mod cart;
pub mod discounts;
pub mod fixtures;
pub mod ledger;
pub mod payments;
pub mod prelude;
pub mod products;
pub mod receipt;
pub mod transactions;
