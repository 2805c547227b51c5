//! Cart
//!
//! The working cart for a single till session. Lines are keyed by product id
//! and kept in insertion order; every total is derived from the lines on
//! demand, so `total == subtotal - total_discount == sum(line totals)` holds
//! for every reachable state.

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    discounts::{DiscountError, LineDiscount, compute_discount, validate_discount},
    products::{Product, ProductId},
};

/// Errors related to cart mutations or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Requested quantity was zero or too large to represent.
    #[error("quantity must be a whole number of at least 1")]
    InvalidQuantity,

    /// Discount was outside of its allowed bounds.
    #[error("invalid discount: {0}")]
    InvalidDiscount(#[source] DiscountError),

    /// No line for the product.
    #[error("product {0} is not in the cart")]
    LineNotFound(ProductId),

    /// Product is priced in a different currency to the cart.
    #[error("product {product} is priced in {found}, but the cart is in {expected}")]
    CurrencyMismatch {
        /// Offending product
        product: ProductId,
        /// Currency of the product price
        found: &'static str,
        /// Currency of the cart
        expected: &'static str,
    },

    /// Product has a price below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// Line amounts no longer fit in minor units.
    #[error("cart amount overflowed")]
    Overflow,

    /// Errors bubbled up from discount calculation.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A single product entry in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Product,
    quantity: u32,
    discount: Option<LineDiscount>,
}

impl CartLine {
    /// The product snapshot taken when the line was created.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The product id this line is keyed by.
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Number of units, always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price at the time the product was added.
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.product.price
    }

    /// The discount applied to this line, if any.
    pub fn discount(&self) -> Option<&LineDiscount> {
        self.discount.as_ref()
    }

    /// Undiscounted line value (`quantity × unit price`).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the value does not fit in minor units.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, CartError> {
        line_subtotal(&self.product.price, self.quantity)
    }

    /// Amount taken off this line by its discount.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the subtotal overflows or the discount cannot be computed.
    pub fn discount_amount(&self) -> Result<Money<'static, Currency>, CartError> {
        let subtotal = self.subtotal()?;

        match &self.discount {
            Some(discount) => Ok(compute_discount(&subtotal, discount)?),
            None => Ok(Money::from_minor(0, subtotal.currency())),
        }
    }

    /// Discounted line value, never negative.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the subtotal overflows or the discount cannot be computed.
    pub fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        Ok(self.subtotal()?.sub(self.discount_amount()?)?)
    }
}

/// Lines held inline before the cart spills to the heap.
type CartLines = SmallVec<[CartLine; 8]>;

/// Cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: CartLines,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: CartLines::new(),
            currency,
        }
    }

    /// Add units of a product to the cart.
    ///
    /// Adding a product that is already in the cart increments its quantity and
    /// keeps the original price snapshot.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero or the new quantity overflows.
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::NegativePrice`]: the product price is below zero.
    ///
    /// The cart is unchanged on error.
    pub fn add_to_cart(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                product: product.id,
                found: product_currency.iso_alpha_code,
                expected: self.currency.iso_alpha_code,
            });
        }

        if product.price.is_negative() {
            return Err(CartError::NegativePrice(product.id));
        }

        if let Some(line) = self.line_mut(product.id) {
            let quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(CartError::InvalidQuantity)?;

            ensure_representable(&line.product.price, quantity)?;

            line.quantity = quantity;

            return Ok(());
        }

        ensure_representable(&product.price, quantity)?;

        self.lines.push(CartLine {
            product,
            quantity,
            discount: None,
        });

        Ok(())
    }

    /// Add a single unit of a product to the cart.
    ///
    /// # Errors
    ///
    /// See [`Cart::add_to_cart`].
    pub fn add_one(&mut self, product: Product) -> Result<(), CartError> {
        self.add_to_cart(product, 1)
    }

    /// Remove a product's line. Removing an absent product is a no-op.
    pub fn remove_from_cart(&mut self, product: ProductId) {
        self.lines.retain(|line| line.product.id != product);
    }

    /// Replace a line's quantity. A quantity of zero or less removes the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`]: a positive quantity was given for a product not in the cart.
    /// - [`CartError::InvalidQuantity`]: the quantity is too large to represent.
    pub fn update_quantity(&mut self, product: ProductId, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove_from_cart(product);

            return Ok(());
        }

        let quantity = u32::try_from(quantity).map_err(|_err| CartError::InvalidQuantity)?;

        let line = self
            .line_mut(product)
            .ok_or(CartError::LineNotFound(product))?;

        ensure_representable(&line.product.price, quantity)?;

        line.quantity = quantity;

        Ok(())
    }

    /// Apply a discount to a line, replacing any existing one.
    ///
    /// An amount larger than the line subtotal is accepted; its effective value
    /// is clamped to the line subtotal when totals are derived.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`]: the product is not in the cart.
    /// - [`CartError::InvalidDiscount`]: the discount is out of bounds.
    pub fn apply_discount(
        &mut self,
        product: ProductId,
        discount: LineDiscount,
    ) -> Result<(), CartError> {
        let line = self
            .line_mut(product)
            .ok_or(CartError::LineNotFound(product))?;

        validate_discount(&line.subtotal()?, &discount).map_err(CartError::InvalidDiscount)?;

        line.discount = Some(discount);

        Ok(())
    }

    /// Remove a line's discount.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn remove_discount(&mut self, product: ProductId) -> Result<(), CartError> {
        let line = self
            .line_mut(product)
            .ok_or(CartError::LineNotFound(product))?;

        line.discount = None;

        Ok(())
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn line(&self, product: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product)
    }

    /// Sum of undiscounted line values.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or overflow error.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, CartError> {
        self.sum_lines(CartLine::subtotal)
    }

    /// Sum of all line discount amounts.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or overflow error.
    pub fn total_discount(&self) -> Result<Money<'static, Currency>, CartError> {
        self.sum_lines(CartLine::discount_amount)
    }

    /// Amount payable, the sum of discounted line totals.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or overflow error.
    pub fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        self.sum_lines(CartLine::total)
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn line_mut(&mut self, product: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == product)
    }

    fn sum_lines(
        &self,
        value: impl Fn(&CartLine) -> Result<Money<'static, Currency>, CartError>,
    ) -> Result<Money<'static, Currency>, CartError> {
        self.lines
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, line| {
                Ok(acc.add(value(line)?)?)
            })
    }
}

fn line_subtotal(
    unit_price: &Money<'static, Currency>,
    quantity: u32,
) -> Result<Money<'static, Currency>, CartError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(CartError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

fn ensure_representable(unit_price: &Money<'static, Currency>, quantity: u32) -> Result<(), CartError> {
    line_subtotal(unit_price, quantity)
        .map(|_subtotal| ())
        .map_err(|_err| CartError::InvalidQuantity)
}
