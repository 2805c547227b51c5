//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

/// Catalog product identifier, as issued by the remote catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product snapshot taken from the catalog when it is added to a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product display name
    pub name: String,

    /// Unit base price
    pub price: Money<'static, Currency>,
}

impl Product {
    /// Create a new product snapshot.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money<'static, Currency>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}
