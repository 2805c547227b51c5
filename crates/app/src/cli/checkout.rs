//! `checkout` command: sells the cart described by a YAML fixture.

use std::path::PathBuf;

use clap::Args;
use tracing::info;
use till::{
    fixtures::CartFixture,
    payments::PaymentMethod,
    transactions::{CustomerId, CustomerRef},
};

use crate::{
    cli::CliError,
    config::{api::ApiConfig, store::StoreConfig},
    context::AppContext,
};

/// Payment option accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PaymentOption {
    /// Cash
    Cash,

    /// Card
    Card,

    /// Bank transfer
    BankTransfer,
}

impl From<PaymentOption> for PaymentMethod {
    fn from(option: PaymentOption) -> Self {
        match option {
            PaymentOption::Cash => Self::Cash,
            PaymentOption::Card => Self::Card,
            PaymentOption::BankTransfer => Self::BankTransfer,
        }
    }
}

/// `checkout` arguments.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Cart fixture (YAML)
    #[arg(long)]
    pub cart: PathBuf,

    /// Payment option
    #[arg(long, value_enum)]
    pub payment: PaymentOption,

    /// Directory id of the customer, if known
    #[arg(long)]
    pub customer_id: Option<u32>,

    /// Back-office API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Store settings.
    #[command(flatten)]
    pub store: StoreConfig,
}

pub(crate) async fn run(args: &CheckoutArgs) -> Result<(), CliError> {
    let mut cart = CartFixture::load(&args.cart)?.cart()?;

    let context = AppContext::from_api_config(&args.api)?;
    let coordinator = context.checkout_coordinator(args.store.store());

    let customer = args
        .customer_id
        .map(|id| CustomerRef::with_id(CustomerId(id)));

    let transaction = coordinator
        .checkout(&mut cart, args.payment.into(), customer)
        .await?;

    info!(
        transaction_id = %transaction.id(),
        order_id = %transaction.order_id(),
        amount = %transaction.amount(),
        "sale recorded"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use crate::{
        checkout::CheckoutError,
        config::{Cli, Command},
    };

    use super::*;

    fn args(cart: PathBuf, store_id: Option<u32>) -> CheckoutArgs {
        CheckoutArgs {
            cart,
            payment: PaymentOption::Cash,
            customer_id: None,
            api: ApiConfig {
                url: "http://127.0.0.1:9".to_string(),
                token: None,
                timeout_seconds: 1,
            },
            store: StoreConfig { store_id },
        }
    }

    fn fixture(yaml: &str) -> TestResult<NamedTempFile> {
        let mut file = NamedTempFile::new()?;

        file.write_all(yaml.as_bytes())?;

        Ok(file)
    }

    #[test]
    fn parses_checkout_arguments() -> TestResult {
        let cli = Cli::try_parse_from([
            "till-app",
            "checkout",
            "--cart",
            "cart.yml",
            "--payment",
            "bank-transfer",
            "--customer-id",
            "12",
            "--api-url",
            "http://till.test",
            "--store-id",
            "3",
        ])?;

        let Command::Checkout(args) = cli.command;

        assert_eq!(args.cart, PathBuf::from("cart.yml"));
        assert_eq!(PaymentMethod::from(args.payment), PaymentMethod::BankTransfer);
        assert_eq!(args.customer_id, Some(12));
        assert_eq!(args.api.url, "http://till.test");
        assert_eq!(args.store.store_id, Some(3));

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_fails_before_any_request() -> TestResult {
        let file = fixture("currency: GBP\nproducts: {}\nlines: []\n")?;

        let result = run(&args(file.path().to_path_buf(), Some(1))).await;

        assert!(
            matches!(result, Err(CliError::Checkout(CheckoutError::EmptyCart))),
            "expected EmptyCart"
        );

        Ok(())
    }

    #[tokio::test]
    async fn missing_store_fails_before_any_request() -> TestResult {
        let file = fixture(
            "
currency: GBP
products:
  widget: { id: 1, name: Widget, price: 1.00 GBP }
lines:
  - product: widget
",
        )?;

        let result = run(&args(file.path().to_path_buf(), None)).await;

        assert!(
            matches!(
                result,
                Err(CliError::Checkout(CheckoutError::MissingStoreContext))
            ),
            "expected MissingStoreContext"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unreadable_fixture_is_reported() {
        let result = run(&args(PathBuf::from("/nonexistent/cart.yml"), Some(1))).await;

        assert!(
            matches!(result, Err(CliError::Fixture(_))),
            "expected fixture error"
        );
    }
}
