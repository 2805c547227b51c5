//! Customer directory client.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use till::transactions::{CustomerId, CustomerRef};

use crate::{
    api::{ApiClient, error_message},
    customers::{errors::CustomersServiceError, service::CustomersService},
};

/// Customer as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomerRecord {
    /// Directory id
    pub id: CustomerId,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<CustomerRecord> for CustomerRef {
    fn from(record: CustomerRecord) -> Self {
        Self {
            id: Some(record.id),
            name: record.name,
            phone: record.phone,
        }
    }
}

/// [`CustomersService`] backed by the back-office HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCustomersService {
    api: ApiClient,
}

impl HttpCustomersService {
    /// Create a service using the given API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CustomersService for HttpCustomersService {
    async fn find_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Option<CustomerRef>, CustomersServiceError> {
        let response = self
            .api
            .request(Method::GET, &format!("/customers/{customer}"))
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(CustomersServiceError::Rejected(error_message(status, &body)));
        }

        let record: CustomerRecord = response.json().await?;

        Ok(Some(record.into()))
    }
}
