//! App Context

use std::sync::Arc;

use thiserror::Error;
use till::{ledger::TransactionLedger, transactions::StoreId};

use crate::{
    api::{ApiClient, ApiClientError},
    checkout::CheckoutCoordinator,
    config::api::ApiConfig,
    customers::{CustomersService, HttpCustomersService},
    orders::{HttpOrdersService, OrdersService},
    receipts::{ConsoleReceiptIssuer, ReceiptIssuer},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to set up back-office api client")]
    Api(#[source] ApiClientError),
}

#[derive(Clone)]
pub struct AppContext {
    pub orders: Arc<dyn OrdersService>,
    pub customers: Arc<dyn CustomersService>,
    pub receipts: Arc<dyn ReceiptIssuer>,
    pub ledger: Arc<TransactionLedger>,
}

impl AppContext {
    /// Build application context against the back-office API.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_api_config(config: &ApiConfig) -> Result<Self, AppInitError> {
        let api = ApiClient::new(config).map_err(AppInitError::Api)?;

        Ok(Self {
            orders: Arc::new(HttpOrdersService::new(api.clone())),
            customers: Arc::new(HttpCustomersService::new(api)),
            receipts: Arc::new(ConsoleReceiptIssuer::stdout()),
            ledger: Arc::new(TransactionLedger::new()),
        })
    }

    /// Checkout coordinator for a till in the given store.
    pub fn checkout_coordinator(&self, store: Option<StoreId>) -> CheckoutCoordinator {
        let coordinator = CheckoutCoordinator::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.receipts),
            Arc::clone(&self.ledger),
        )
        .with_customers(Arc::clone(&self.customers));

        match store {
            Some(store) => coordinator.with_store(store),
            None => coordinator,
        }
    }
}
