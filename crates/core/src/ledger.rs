//! Transaction Ledger
//!
//! In-session history of completed sales. Transactions are appended once and
//! never removed; the only mutation is the one-way move from `Completed` to
//! `Voided` or `Returned`, recorded with an audit entry.
//!
//! The ledger locks internally so it can be shared between the checkout flow
//! and void/return workflows. Two transitions racing on the same transaction
//! are decided by the status check under the lock: the first to see
//! `Completed` wins and the other gets [`LedgerError::InvalidTransition`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use jiff::Timestamp;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::transactions::{Transaction, TransactionAudit, TransactionId, TransactionStatus};

/// Errors raised by ledger transitions.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// No transaction with this id in the ledger.
    #[error("transaction {0} not found")]
    NotFound(TransactionId),

    /// The transaction is not in a state that allows the transition.
    #[error("transaction is already {from} and cannot be {to}")]
    InvalidTransition {
        /// Current status
        from: TransactionStatus,
        /// Requested status
        to: TransactionStatus,
    },

    /// No reason was given.
    #[error("a reason is required to void or return a sale")]
    MissingReason,

    /// No approver was given.
    #[error("an approver is required to void or return a sale")]
    MissingApprover,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Transaction Ledger
#[derive(Debug, Default)]
pub struct TransactionLedger {
    transactions: Mutex<Vec<Transaction>>,
}

impl TransactionLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed transaction.
    pub fn record(&self, transaction: Transaction) {
        debug!(transaction_id = %transaction.id(), "recorded transaction");

        self.lock().push(transaction);
    }

    /// Void a completed transaction.
    ///
    /// The approver identity is recorded as given; authorising it is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::MissingReason`] / [`LedgerError::MissingApprover`]: blank input.
    /// - [`LedgerError::NotFound`]: unknown id.
    /// - [`LedgerError::InvalidTransition`]: the transaction is not `Completed`.
    ///
    /// The ledger is unchanged on error.
    pub fn void_transaction(
        &self,
        id: TransactionId,
        reason: &str,
        approver: &str,
    ) -> Result<Transaction, LedgerError> {
        self.transition(id, TransactionStatus::Voided, reason, approver)
    }

    /// Mark a completed transaction as returned.
    ///
    /// Restocking is left to the caller, which receives the updated
    /// transaction and its lines.
    ///
    /// # Errors
    ///
    /// Same as [`TransactionLedger::void_transaction`].
    pub fn return_transaction(
        &self,
        id: TransactionId,
        reason: &str,
        approver: &str,
    ) -> Result<Transaction, LedgerError> {
        self.transition(id, TransactionStatus::Returned, reason, approver)
    }

    /// All transactions in insertion order.
    pub fn list_transactions(&self) -> Vec<Transaction> {
        self.lock().clone()
    }

    /// Get a transaction by id.
    pub fn get(&self, id: TransactionId) -> Option<Transaction> {
        self.lock().iter().find(|t| t.id() == id).cloned()
    }

    /// Number of recorded transactions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no transactions have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sum of amounts over `Completed` transactions.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Money`] if a transaction is in another currency.
    pub fn completed_revenue(
        &self,
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, LedgerError> {
        self.lock()
            .iter()
            .filter(|t| t.status() == TransactionStatus::Completed)
            .try_fold(Money::from_minor(0, currency), |acc, t| {
                Ok(acc.add(t.amount())?)
            })
    }

    fn transition(
        &self,
        id: TransactionId,
        to: TransactionStatus,
        reason: &str,
        approver: &str,
    ) -> Result<Transaction, LedgerError> {
        let reason = reason.trim();
        let approver = approver.trim();

        if reason.is_empty() {
            return Err(LedgerError::MissingReason);
        }

        if approver.is_empty() {
            return Err(LedgerError::MissingApprover);
        }

        let mut transactions = self.lock();

        let transaction = transactions
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(LedgerError::NotFound(id))?;

        let from = transaction.status();

        if from.is_terminal() {
            return Err(LedgerError::InvalidTransition { from, to });
        }

        transaction.transition(
            to,
            TransactionAudit {
                reason: reason.to_string(),
                approver: approver.to_string(),
                at: Timestamp::now(),
            },
        );

        debug!(transaction_id = %id, %from, %to, approver, "transaction status changed");

        Ok(transaction.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Transaction>> {
        // Every mutation completes under a single guard, so a poisoned lock still holds
        // consistent data.
        self.transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
