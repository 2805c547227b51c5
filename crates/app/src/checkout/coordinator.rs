//! Checkout coordinator.
//!
//! Turns a cart into a recorded sale. The remote order is the commit point:
//! until it succeeds nothing local changes, and once it succeeds the sale is
//! recorded and the cart cleared before the receipt is attempted.

use std::{fmt, sync::Arc};

use tracing::{Span, info, warn};
use till::{
    cart::Cart,
    ledger::TransactionLedger,
    payments::PaymentMethod,
    transactions::{CustomerRef, SaleSnapshot, StoreId, Transaction},
};

use crate::{
    checkout::errors::CheckoutError,
    customers::CustomersService,
    orders::{OrdersService, models::CreateOrderRequest},
    receipts::ReceiptIssuer,
};

/// Coordinates checkout between the cart, the order API, the ledger and
/// receipt issuance.
#[derive(Clone)]
pub struct CheckoutCoordinator {
    orders: Arc<dyn OrdersService>,
    customers: Option<Arc<dyn CustomersService>>,
    receipts: Arc<dyn ReceiptIssuer>,
    ledger: Arc<TransactionLedger>,
    store: Option<StoreId>,
}

impl CheckoutCoordinator {
    /// Create a coordinator with no store context and no customer lookup.
    pub fn new(
        orders: Arc<dyn OrdersService>,
        receipts: Arc<dyn ReceiptIssuer>,
        ledger: Arc<TransactionLedger>,
    ) -> Self {
        Self {
            orders,
            customers: None,
            receipts,
            ledger,
            store: None,
        }
    }

    /// Set the store sales are placed for.
    #[must_use]
    pub fn with_store(mut self, store: StoreId) -> Self {
        self.store = Some(store);
        self
    }

    /// Enrich customers by id through the given directory.
    #[must_use]
    pub fn with_customers(mut self, customers: Arc<dyn CustomersService>) -> Self {
        self.customers = Some(customers);
        self
    }

    /// Ledger completed sales are recorded in.
    pub fn ledger(&self) -> &Arc<TransactionLedger> {
        &self.ledger
    }

    /// Check out the cart.
    ///
    /// Submits the order once, without retrying. On success the returned
    /// transaction is already in the ledger and the cart is empty. A receipt
    /// failure is logged and does not affect the result.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`] / [`CheckoutError::MissingStoreContext`]:
    ///   checked before any remote call.
    /// - [`CheckoutError::CheckoutFailed`]: the order API refused or could not
    ///   take the order.
    /// - [`CheckoutError::Totals`]: cart totals could not be derived.
    ///
    /// The cart and ledger are unchanged on error.
    #[tracing::instrument(
        name = "checkout.coordinator.checkout",
        skip(self, cart, customer),
        fields(
            store_id = tracing::field::Empty,
            payment_method = %payment_method,
            line_count = cart.len(),
            transaction_id = tracing::field::Empty,
            order_id = tracing::field::Empty
        ),
        err
    )]
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        payment_method: PaymentMethod,
        customer: Option<CustomerRef>,
    ) -> Result<Transaction, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let store_id = self.store.ok_or(CheckoutError::MissingStoreContext)?;

        let span = Span::current();

        span.record("store_id", tracing::field::display(store_id));

        let sale = SaleSnapshot::from_cart(cart)?;

        let request = CreateOrderRequest::for_sale(
            store_id,
            &sale,
            payment_method,
            customer.as_ref().and_then(|c| c.id),
        );

        let order = self.orders.create_order(request).await.map_err(|error| {
            warn!(%error, "order creation failed");

            CheckoutError::CheckoutFailed(error.into_message())
        })?;

        span.record("order_id", tracing::field::display(order.id));

        let customer = self.resolve_customer(customer).await;
        let transaction = sale.complete(order.id, store_id, payment_method, customer);

        span.record("transaction_id", tracing::field::display(transaction.id()));

        self.ledger.record(transaction.clone());
        cart.clear_cart();

        info!(amount = %transaction.amount(), "checkout completed");

        if let Err(error) = self.receipts.issue(&transaction).await {
            warn!(%error, "receipt issuance failed");
        }

        Ok(transaction)
    }

    /// Fills in directory details for a customer given by id. Details passed
    /// in by the caller win; lookup misses and failures keep the reference as is.
    async fn resolve_customer(&self, customer: Option<CustomerRef>) -> Option<CustomerRef> {
        let customer = customer?;

        let (Some(customers), Some(id)) = (&self.customers, customer.id) else {
            return Some(customer);
        };

        match customers.find_customer(id).await {
            Ok(Some(found)) => Some(CustomerRef {
                id: Some(id),
                name: customer.name.or(found.name),
                phone: customer.phone.or(found.phone),
            }),
            Ok(None) => {
                warn!(customer_id = %id, "customer not found in directory");

                Some(customer)
            }
            Err(error) => {
                warn!(customer_id = %id, %error, "customer lookup failed");

                Some(customer)
            }
        }
    }
}

impl fmt::Debug for CheckoutCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutCoordinator")
            .field("store", &self.store)
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}
