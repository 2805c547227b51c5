//! Test Helpers

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::GBP};
use till::{
    cart::{Cart, CartError},
    discounts::LineDiscount,
    payments::PaymentMethod,
    products::{Product, ProductId},
    transactions::{OrderId, SaleSnapshot, StoreId, Transaction},
};

pub(crate) const WIDGET: ProductId = ProductId(10);

pub(crate) fn widget() -> Product {
    Product::new(WIDGET, "Widget", Money::from_minor(1000, GBP))
}

/// Two widgets at 10% off: subtotal 20.00, discount 2.00, total 18.00.
pub(crate) fn discounted_cart() -> Result<Cart, CartError> {
    let mut cart = Cart::new(GBP);

    cart.add_to_cart(widget(), 2)?;
    cart.apply_discount(WIDGET, LineDiscount::PercentageOff(Percentage::from(0.1)))?;

    Ok(cart)
}

pub(crate) fn completed_sale() -> Result<Transaction, CartError> {
    Ok(SaleSnapshot::from_cart(&discounted_cart()?)?.complete(
        OrderId(9001),
        StoreId(1),
        PaymentMethod::Cash,
        None,
    ))
}
