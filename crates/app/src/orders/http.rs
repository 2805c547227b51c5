//! Order API client.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use crate::{
    api::{ApiClient, error_message},
    orders::{
        errors::OrdersServiceError,
        models::{CreateOrderRequest, CreatedOrder},
        service::OrdersService,
    },
};

/// [`OrdersService`] backed by the back-office HTTP API.
#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    api: ApiClient,
}

impl HttpOrdersService {
    /// Create a service using the given API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<CreatedOrder, OrdersServiceError> {
        let response = self
            .api
            .request(Method::POST, "/orders")
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            debug!(%status, "order rejected");

            return Err(OrdersServiceError::Rejected(error_message(status, &body)));
        }

        Ok(response.json().await?)
    }
}
