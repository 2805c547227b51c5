//! Customers service.

use async_trait::async_trait;
use mockall::automock;
use till::transactions::{CustomerId, CustomerRef};

use crate::customers::errors::CustomersServiceError;

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Looks up a customer in the directory. `Ok(None)` when the id is unknown.
    async fn find_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Option<CustomerRef>, CustomersServiceError>;
}
