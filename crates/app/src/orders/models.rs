//! Order API models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use till::{
    payments::PaymentMethod,
    products::ProductId,
    transactions::{CustomerId, OrderId, SaleSnapshot, StoreId, TransactionLine},
};

/// Order creation payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Store placing the order
    pub store_id: StoreId,

    /// One entry per cart line
    pub order_items: Vec<OrderItem>,

    /// Payment option wire code
    pub payment_option: PaymentMethod,

    /// Directory customer, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
}

impl CreateOrderRequest {
    /// Build the order payload for a snapshotted sale.
    pub fn for_sale(
        store_id: StoreId,
        sale: &SaleSnapshot,
        payment_option: PaymentMethod,
        customer_id: Option<CustomerId>,
    ) -> Self {
        Self {
            store_id,
            order_items: sale.lines().iter().map(OrderItem::from).collect(),
            payment_option,
            customer_id,
        }
    }
}

/// A single order line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Catalog product id
    pub product_id: ProductId,

    /// Units ordered
    pub quantity: u32,

    /// Unit price in major units, e.g. `10.5`
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl From<&TransactionLine> for OrderItem {
    fn from(line: &TransactionLine) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: Decimal::new(
                line.unit_price.to_minor_units(),
                line.unit_price.currency().exponent,
            ),
        }
    }
}

/// Order creation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedOrder {
    /// Server-side order id
    pub id: OrderId,
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rusty_money::{Money, iso::GBP};
    use serde_json::json;
    use testresult::TestResult;
    use till::{
        cart::Cart,
        discounts::LineDiscount,
        products::Product,
    };

    use super::*;

    fn sale() -> TestResult<SaleSnapshot> {
        let mut cart = Cart::new(GBP);

        cart.add_to_cart(
            Product::new(ProductId(10), "Widget", Money::from_minor(1050, GBP)),
            2,
        )?;
        cart.add_one(Product::new(
            ProductId(11),
            "Gadget",
            Money::from_minor(99, GBP),
        ))?;
        cart.apply_discount(
            ProductId(10),
            LineDiscount::PercentageOff(Percentage::from(0.1)),
        )?;

        Ok(SaleSnapshot::from_cart(&cart)?)
    }

    #[test]
    fn serializes_camel_case_with_wire_codes() -> TestResult {
        let request = CreateOrderRequest::for_sale(
            StoreId(4),
            &sale()?,
            PaymentMethod::Card,
            Some(CustomerId(12)),
        );

        assert_eq!(
            serde_json::to_value(&request)?,
            json!({
                "storeId": 4,
                "orderItems": [
                    { "productId": 10, "quantity": 2, "unitPrice": 10.5 },
                    { "productId": 11, "quantity": 1, "unitPrice": 0.99 },
                ],
                "paymentOption": 1,
                "customerId": 12,
            })
        );

        Ok(())
    }

    #[test]
    fn omits_customer_when_unknown() -> TestResult {
        let request =
            CreateOrderRequest::for_sale(StoreId(4), &sale()?, PaymentMethod::Cash, None);
        let value = serde_json::to_value(&request)?;

        assert_eq!(value.get("paymentOption"), Some(&json!(0)));
        assert!(value.get("customerId").is_none(), "customerId should be omitted");

        Ok(())
    }

    #[test]
    fn reads_created_order_id() -> TestResult {
        let created: CreatedOrder = serde_json::from_str(r#"{"id": 9001, "status": "new"}"#)?;

        assert_eq!(created.id, OrderId(9001));

        Ok(())
    }
}
