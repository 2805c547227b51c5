//! Receipt
//!
//! Plain-text receipt for a completed transaction.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::transactions::{Transaction, TransactionLine, TransactionStatus};

/// Errors that can occur while writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Receipt for a completed transaction.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    transaction: &'a Transaction,
}

impl<'a> Receipt<'a> {
    /// Create a receipt for the given transaction.
    pub fn new(transaction: &'a Transaction) -> Self {
        Self { transaction }
    }

    /// The transaction being receipted.
    pub fn transaction(&self) -> &'a Transaction {
        self.transaction
    }

    /// Writes the receipt as a table of lines followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let transaction = self.transaction;
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Discount", "Total"]);

        for line in transaction.lines() {
            builder.push_record(line_cells(line));
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..5), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "{table}")?;

        writeln!(out, " Subtotal: {}", transaction.subtotal())?;
        writeln!(out, " Discount: -{}", transaction.total_discount())?;
        writeln!(out, " Total:    {}", transaction.amount())?;
        writeln!(out, " Paid by:  {}", transaction.payment_method())?;
        writeln!(out, " Order:    #{}", transaction.order_id())?;

        if let Some(name) = transaction.customer().and_then(|c| c.name.as_deref()) {
            writeln!(out, " Customer: {name}")?;
        }

        if transaction.status() != TransactionStatus::Completed {
            writeln!(out, " Status:   {}", transaction.status().to_string().to_uppercase())?;
        }

        writeln!(out, " Ref:      {}", transaction.id())?;

        Ok(())
    }
}

impl<'a> From<&'a Transaction> for Receipt<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self::new(transaction)
    }
}

fn line_cells(line: &TransactionLine) -> [String; 5] {
    let discount = if line.discount.to_minor_units() == 0 {
        String::new()
    } else {
        format!("-{}", line.discount)
    };

    [
        line.name.clone(),
        line.quantity.to_string(),
        line.unit_price.to_string(),
        discount,
        line.total.to_string(),
    ]
}
