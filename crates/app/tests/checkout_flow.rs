//! Checkout flow tests
//!
//! Drives a sale from cart to ledger through the coordinator with mocked
//! collaborators, then voids and returns recorded sales.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::GBP};
use testresult::TestResult;

use till::prelude::*;
use till_app::{
    checkout::CheckoutCoordinator,
    orders::{MockOrdersService, models::CreatedOrder},
    receipts::MockReceiptIssuer,
};

fn discounted_cart() -> Result<Cart, CartError> {
    let mut cart = Cart::new(GBP);

    cart.add_to_cart(
        Product::new(ProductId(10), "Widget", Money::from_minor(1000, GBP)),
        2,
    )?;
    cart.apply_discount(
        ProductId(10),
        LineDiscount::PercentageOff(Percentage::from(0.1)),
    )?;

    Ok(cart)
}

fn coordinator(checkouts: usize) -> CheckoutCoordinator {
    let next_order = Arc::new(AtomicU64::new(9001));
    let mut orders = MockOrdersService::new();

    orders
        .expect_create_order()
        .times(checkouts)
        .returning(move |_| {
            Ok(CreatedOrder {
                id: OrderId(next_order.fetch_add(1, Ordering::SeqCst)),
            })
        });

    let mut receipts = MockReceiptIssuer::new();

    receipts.expect_issue().times(checkouts).returning(|_| Ok(()));

    CheckoutCoordinator::new(
        Arc::new(orders),
        Arc::new(receipts),
        Arc::new(TransactionLedger::new()),
    )
    .with_store(StoreId(1))
}

#[tokio::test]
async fn checked_out_sale_can_be_voided_once() -> TestResult {
    let coordinator = coordinator(1);
    let mut cart = discounted_cart()?;

    let transaction = coordinator
        .checkout(&mut cart, PaymentMethod::Cash, None)
        .await?;

    let ledger = coordinator.ledger();

    assert!(cart.is_empty(), "cart should be cleared");
    assert_eq!(ledger.len(), 1);
    assert_eq!(transaction.amount(), Money::from_minor(1800, GBP));

    let voided = ledger.void_transaction(transaction.id(), "customer dispute", "mgr_jane")?;

    assert_eq!(voided.status(), TransactionStatus::Voided);
    assert_eq!(
        voided.audit().map(|a| a.approver.as_str()),
        Some("mgr_jane")
    );
    assert_eq!(
        ledger.void_transaction(transaction.id(), "customer dispute", "mgr_jane"),
        Err(LedgerError::InvalidTransition {
            from: TransactionStatus::Voided,
            to: TransactionStatus::Voided,
        })
    );
    assert_eq!(ledger.completed_revenue(GBP)?, Money::from_minor(0, GBP));

    Ok(())
}

#[tokio::test]
async fn tills_share_one_ledger() -> TestResult {
    let coordinator = coordinator(3);
    let mut handles = Vec::new();

    for _ in 0..3 {
        let coordinator = coordinator.clone();
        let mut cart = discounted_cart()?;

        handles.push(tokio::spawn(async move {
            coordinator
                .checkout(&mut cart, PaymentMethod::Card, None)
                .await
        }));
    }

    for handle in handles {
        handle.await??;
    }

    let ledger = coordinator.ledger();
    let returned = ledger
        .list_transactions()
        .first()
        .map(Transaction::id)
        .ok_or("ledger should not be empty")?;

    ledger.return_transaction(returned, "faulty", "mgr_sam")?;

    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.completed_revenue(GBP)?, Money::from_minor(3600, GBP));

    Ok(())
}
