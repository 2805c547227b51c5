//! Transactions
//!
//! The local record of a completed sale. A [`Transaction`] is built from a
//! [`SaleSnapshot`] of the cart once the remote order has been created, and
//! afterwards only changes status through the [`TransactionLedger`].
//!
//! Status wire codes: `Completed = 0`, `Voided = 1`, `Returned = 2`.
//!
//! [`TransactionLedger`]: crate::ledger::TransactionLedger

use std::fmt;

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    cart::{Cart, CartError, CartLine},
    payments::PaymentMethod,
    products::ProductId,
};

/// Local transaction id, a time-ordered (v7) UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a fresh id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Server-side order id returned by the order API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store the till belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub u32);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer id in the remote customer directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u32);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerRef {
    /// Directory id, when the customer is known to the directory
    pub id: Option<CustomerId>,

    /// Display name
    pub name: Option<String>,

    /// Phone number
    pub phone: Option<String>,
}

impl CustomerRef {
    /// Reference a directory customer by id only.
    pub fn with_id(id: CustomerId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

/// Transaction status. `Completed` is the only revenue-counted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    /// Sale completed
    Completed,

    /// Sale cancelled after the fact
    Voided,

    /// Sale reversed, goods returned
    Returned,
}

impl TransactionStatus {
    /// Wire code for the status.
    pub const fn code(self) -> u8 {
        match self {
            Self::Completed => 0,
            Self::Voided => 1,
            Self::Returned => 2,
        }
    }

    /// `Voided` and `Returned` allow no further transitions.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Completed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "completed",
            Self::Voided => "voided",
            Self::Returned => "returned",
        })
    }
}

/// Who approved a void or return, why, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionAudit {
    /// Reason given for the void/return
    pub reason: String,

    /// Identity of the approver, as supplied by the calling workflow
    pub approver: String,

    /// When the transition was recorded
    pub at: Timestamp,
}

/// Immutable copy of a cart line at completion time.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionLine {
    /// Product id
    pub product_id: ProductId,

    /// Product display name
    pub name: String,

    /// Unit price snapshot
    pub unit_price: Money<'static, Currency>,

    /// Number of units
    pub quantity: u32,

    /// Amount discounted from the line
    pub discount: Money<'static, Currency>,

    /// Discounted line value
    pub total: Money<'static, Currency>,
}

impl TryFrom<&CartLine> for TransactionLine {
    type Error = CartError;

    fn try_from(line: &CartLine) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: line.product_id(),
            name: line.product().name.clone(),
            unit_price: line.unit_price(),
            quantity: line.quantity(),
            discount: line.discount_amount()?,
            total: line.total()?,
        })
    }
}

/// Lines and totals of a cart, decoupled from the live cart.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleSnapshot {
    lines: Vec<TransactionLine>,
    subtotal: Money<'static, Currency>,
    total_discount: Money<'static, Currency>,
    amount: Money<'static, Currency>,
}

impl SaleSnapshot {
    /// Snapshot the cart's lines and totals.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the cart totals cannot be derived.
    pub fn from_cart(cart: &Cart) -> Result<Self, CartError> {
        let lines = cart
            .items()
            .iter()
            .map(TransactionLine::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lines,
            subtotal: cart.subtotal()?,
            total_discount: cart.total_discount()?,
            amount: cart.total()?,
        })
    }

    /// Snapshotted lines.
    pub fn lines(&self) -> &[TransactionLine] {
        &self.lines
    }

    /// Amount payable.
    pub fn amount(&self) -> Money<'static, Currency> {
        self.amount
    }

    /// Turn the snapshot into a completed transaction for a created order.
    pub fn complete(
        self,
        order_id: OrderId,
        store_id: StoreId,
        payment_method: PaymentMethod,
        customer: Option<CustomerRef>,
    ) -> Transaction {
        Transaction {
            id: TransactionId::generate(),
            order_id,
            store_id,
            lines: self.lines,
            payment_method,
            subtotal: self.subtotal,
            total_discount: self.total_discount,
            amount: self.amount,
            customer,
            status: TransactionStatus::Completed,
            audit: None,
            completed_at: Timestamp::now(),
        }
    }
}

/// A completed sale.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: TransactionId,
    order_id: OrderId,
    store_id: StoreId,
    lines: Vec<TransactionLine>,
    payment_method: PaymentMethod,
    subtotal: Money<'static, Currency>,
    total_discount: Money<'static, Currency>,
    amount: Money<'static, Currency>,
    customer: Option<CustomerRef>,
    status: TransactionStatus,
    audit: Option<TransactionAudit>,
    completed_at: Timestamp,
}

impl Transaction {
    /// Local transaction id
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Correlated server-side order id
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Store the sale was made in
    pub fn store_id(&self) -> StoreId {
        self.store_id
    }

    /// Lines sold
    pub fn lines(&self) -> &[TransactionLine] {
        &self.lines
    }

    /// Payment method used
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Total before discounts
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Sum of line discounts
    pub fn total_discount(&self) -> Money<'static, Currency> {
        self.total_discount
    }

    /// Amount charged, equal to the cart total at completion time
    pub fn amount(&self) -> Money<'static, Currency> {
        self.amount
    }

    /// Customer captured at checkout
    pub fn customer(&self) -> Option<&CustomerRef> {
        self.customer.as_ref()
    }

    /// Current status
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Void/return audit record
    pub fn audit(&self) -> Option<&TransactionAudit> {
        self.audit.as_ref()
    }

    /// When the sale completed
    pub fn completed_at(&self) -> Timestamp {
        self.completed_at
    }

    pub(crate) fn transition(&mut self, status: TransactionStatus, audit: TransactionAudit) {
        self.status = status;
        self.audit = Some(audit);
    }
}
