//! MoMo CLI
//!
//! Command-line interface for the MTN MoMo Collections and Disbursements API.
//! Configuration comes from the environment (and `.env`); `--environment`
//! and `--base-url` override `MTN_ENVIRONMENT` and `BASE_URL`, and per-payment flags override the
//! configured currency and callback URL.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use momo_client::{CollectionClient, DisbursementClient, MomoConfig, ProductClient, Provisioner};
use momo_types::{
    CollectionProduct, Currency, DisbursementProduct, PaymentOrder, Product, TargetEnvironment,
    TransactionRef,
};

#[derive(Parser)]
#[command(name = "momo")]
#[command(author, version, about = "MTN MoMo API CLI client", long_about = None)]
struct Cli {
    /// Target environment (sandbox, mtnuganda, mtnghana, ...)
    #[arg(long, global = true, env = "MTN_ENVIRONMENT")]
    environment: Option<String>,

    /// Base URL of the MoMo API
    #[arg(long, global = true, env = "BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a sandbox API user and key
    Provision {
        /// Product whose subscription key is used
        #[arg(long, value_enum, default_value = "collection")]
        product: ProductArg,
    },
    /// Collection operations
    Collection {
        #[command(subcommand)]
        action: CollectionCommands,
    },
    /// Disbursement operations
    Disbursement {
        #[command(subcommand)]
        action: DisbursementCommands,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProductArg {
    Collection,
    Disbursement,
}

#[derive(Subcommand)]
enum CollectionCommands {
    /// Fetch a Bearer token
    Token,
    /// Show the collection account balance
    Balance,
    /// Ask a payer to approve a payment
    RequestToPay(PaymentArgs),
    /// Show the status of a request-to-pay
    Status {
        /// Transaction reference (UUID)
        reference: String,
    },
}

#[derive(Subcommand)]
enum DisbursementCommands {
    /// Fetch a Bearer token
    Token,
    /// Show the disbursement account balance
    Balance,
    /// Send money to a payee
    Transfer(PaymentArgs),
    /// Show the status of a transfer
    Status {
        /// Transaction reference (UUID)
        reference: String,
    },
}

#[derive(Args)]
struct PaymentArgs {
    #[arg(long)]
    amount: String,
    /// Counterparty phone number
    #[arg(long)]
    msisdn: String,
    #[arg(long)]
    external_id: String,
    #[arg(long)]
    payer_message: Option<String>,
    #[arg(long)]
    payee_note: Option<String>,
    /// Overrides the default currency
    #[arg(long)]
    currency: Option<String>,
    /// Overrides the configured callback URL
    #[arg(long)]
    callback_url: Option<String>,
}

impl PaymentArgs {
    fn into_order(self) -> Result<PaymentOrder> {
        let mut order = PaymentOrder::new(&self.amount, &self.msisdn, &self.external_id)?;
        if let Some(message) = self.payer_message {
            order = order.with_payer_message(message);
        }
        if let Some(note) = self.payee_note {
            order = order.with_payee_note(note);
        }
        if let Some(currency) = self.currency {
            order = order.with_currency(Currency::new(&currency)?);
        }
        if let Some(url) = self.callback_url {
            order = order.with_callback_url(url);
        }
        Ok(order)
    }
}

/// Applies global flags on top of the environment configuration.
fn load_config(cli: &Cli) -> Result<MomoConfig> {
    let mut config = MomoConfig::from_env()?;
    if let Some(env) = &cli.environment {
        config = config.with_environment(env.parse::<TargetEnvironment>()?);
    }
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.as_str());
    }
    Ok(config)
}

fn parse_reference(s: &str) -> Result<TransactionRef> {
    s.parse()
        .with_context(|| format!("Invalid transaction reference: {s}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn provision<P: Product>(config: &MomoConfig) -> Result<()> {
    if !config.environment.is_sandbox() {
        anyhow::bail!(
            "API users can only be provisioned in the sandbox (environment is {})",
            config.environment
        );
    }
    let subscription_key = config
        .credentials::<P>()
        .subscription_key
        .with_context(|| format!("{}_PRIMARY_KEY is required", P::ENV_PREFIX))?;
    let callback_host = config.provider_callback_host()?;

    let provisioner = Provisioner::new(reqwest::Client::new(), &config.base_url, subscription_key);
    let creds = provisioner.provision(&callback_host).await?;
    print_json(&creds)
}

async fn token<P: Product>(client: &ProductClient<P>) -> Result<()> {
    print_json(&client.token().await?)
}

async fn balance<P: Product>(client: &ProductClient<P>) -> Result<()> {
    print_json(&client.balance().await?)
}

async fn status<P: Product>(client: &ProductClient<P>, reference: &str) -> Result<()> {
    let reference = parse_reference(reference)?;
    print_json(&client.transaction_status(reference).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,momo_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Provision { product } => match product {
            ProductArg::Collection => provision::<CollectionProduct>(&config).await?,
            ProductArg::Disbursement => provision::<DisbursementProduct>(&config).await?,
        },

        Commands::Collection { action } => {
            let client = CollectionClient::connect(&config).await?;
            match action {
                CollectionCommands::Token => token(&client).await?,
                CollectionCommands::Balance => balance(&client).await?,
                CollectionCommands::RequestToPay(args) => {
                    let order = args.into_order()?;
                    print_json(&client.request_to_pay(&order).await?)?;
                }
                CollectionCommands::Status { reference } => status(&client, &reference).await?,
            }
        }

        Commands::Disbursement { action } => {
            let client = DisbursementClient::connect(&config).await?;
            match action {
                DisbursementCommands::Token => token(&client).await?,
                DisbursementCommands::Balance => balance(&client).await?,
                DisbursementCommands::Transfer(args) => {
                    let order = args.into_order()?;
                    print_json(&client.transfer(&order).await?)?;
                }
                DisbursementCommands::Status { reference } => status(&client, &reference).await?,
            }
        }
    }

    Ok(())
}
