//! Receipt issuance.
//!
//! Runs after the sale is recorded. A failure here is reported to the caller
//! but never undoes the sale.

use std::{
    io::{self, Stdout, Write},
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use till::{
    receipt::{Receipt, ReceiptError},
    transactions::Transaction,
};

/// Errors raised while issuing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptIssueError {
    /// The receipt could not be written.
    #[error(transparent)]
    Write(#[from] ReceiptError),
}

#[automock]
#[async_trait]
pub trait ReceiptIssuer: Send + Sync {
    /// Issues a receipt for a completed transaction.
    async fn issue(&self, transaction: &Transaction) -> Result<(), ReceiptIssueError>;
}

/// Writes receipts to an output stream.
#[derive(Debug)]
pub struct ReceiptPrinter<W> {
    out: Mutex<W>,
}

/// Receipt printer for the terminal.
pub type ConsoleReceiptIssuer = ReceiptPrinter<Stdout>;

impl<W> ReceiptPrinter<W> {
    /// Print receipts to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Release the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReceiptPrinter<Stdout> {
    /// Print receipts to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

#[async_trait]
impl<W: Write + Send> ReceiptIssuer for ReceiptPrinter<W> {
    async fn issue(&self, transaction: &Transaction) -> Result<(), ReceiptIssueError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);

        Receipt::new(transaction).write_to(&mut *out)?;
        out.flush().map_err(ReceiptError::from)?;

        Ok(())
    }
}
