//! Payments
//!
//! Payment options and their integer wire codes:
//!
//! | Variant        | Code |
//! |----------------|------|
//! | `Cash`         | 0    |
//! | `Card`         | 1    |
//! | `BankTransfer` | 2    |

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unknown payment option code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment option code {0}")]
pub struct UnknownPaymentCode(pub u8);

/// How a sale was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PaymentMethod {
    /// Cash
    Cash,

    /// Credit or debit card
    Card,

    /// Bank transfer
    BankTransfer,
}

impl PaymentMethod {
    /// Wire code for the payment option.
    pub const fn code(self) -> u8 {
        match self {
            Self::Cash => 0,
            Self::Card => 1,
            Self::BankTransfer => 2,
        }
    }
}

impl From<PaymentMethod> for u8 {
    fn from(method: PaymentMethod) -> Self {
        method.code()
    }
}

impl TryFrom<u8> for PaymentMethod {
    type Error = UnknownPaymentCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Cash),
            1 => Ok(Self::Card),
            2 => Ok(Self::BankTransfer),
            other => Err(UnknownPaymentCode(other)),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::BankTransfer => "bank transfer",
        })
    }
}
