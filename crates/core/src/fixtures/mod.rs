//! Fixtures
//!
//! YAML description of a cart, used to script till sessions:
//!
//! ```yaml
//! currency: GBP
//! products:
//!   widget:
//!     id: 1
//!     name: Widget
//!     price: 10.00 GBP
//! lines:
//!   - product: widget
//!     quantity: 2
//!     discount: 10%
//! ```

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    products::{Product, ProductId},
};

pub mod prices;

pub use prices::{parse_currency, parse_discount, parse_percentage, parse_price};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Line could not be added to the cart
    #[error("Failed to build cart: {0}")]
    Cart(#[from] CartError),
}

/// Cart fixture
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart currency code (e.g., "GBP")
    pub currency: String,

    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,

    /// Lines, in the order they are added to the cart
    #[serde(default)]
    pub lines: Vec<LineFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Catalog id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Product price (e.g., "2.99 GBP")
    pub price: String,
}

/// Line Fixture
#[derive(Debug, Deserialize)]
pub struct LineFixture {
    /// Product key
    pub product: String,

    /// Quantity, defaults to 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Optional discount (e.g., "10%" or "1.50 GBP")
    #[serde(default)]
    pub discount: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl TryFrom<&ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: &ProductFixture) -> Result<Self, Self::Error> {
        Ok(Product::new(
            ProductId(fixture.id),
            fixture.name.clone(),
            parse_price(&fixture.price)?,
        ))
    }
}

impl CartFixture {
    /// Load a cart fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Parse a cart fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Build a cart by adding each line through the cart operations.
    ///
    /// # Errors
    ///
    /// Returns an error if a line references an unknown product, a price or
    /// discount cannot be parsed, or the cart rejects a line.
    pub fn cart(&self) -> Result<Cart, FixtureError> {
        let mut cart = Cart::new(parse_currency(&self.currency)?);

        for line in &self.lines {
            let product = self
                .products
                .get(&line.product)
                .ok_or_else(|| FixtureError::ProductNotFound(line.product.clone()))?;

            let product = Product::try_from(product)?;
            let id = product.id;

            cart.add_to_cart(product, line.quantity)?;

            if let Some(discount) = &line.discount {
                cart.apply_discount(id, parse_discount(discount)?)?;
            }
        }

        Ok(cart)
    }
}
