//! Orders service.

use async_trait::async_trait;
use mockall::automock;

use crate::orders::{
    errors::OrdersServiceError,
    models::{CreateOrderRequest, CreatedOrder},
};

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Creates a remote order for a sale. Called at most once per checkout.
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<CreatedOrder, OrdersServiceError>;
}
