//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    discounts::{DiscountError, LineDiscount, compute_discount},
    ledger::{LedgerError, TransactionLedger},
    payments::PaymentMethod,
    products::{Product, ProductId},
    receipt::{Receipt, ReceiptError},
    transactions::{
        CustomerId, CustomerRef, OrderId, SaleSnapshot, StoreId, Transaction, TransactionAudit,
        TransactionId, TransactionLine, TransactionStatus,
    },
};
