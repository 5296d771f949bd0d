//! # MoMo Client SDK
//!
//! A typed async Rust client for the MTN Mobile Money Collections and
//! Disbursements APIs.
//!
//! ```no_run
//! use momo_client::{CollectionClient, MomoConfig};
//! use momo_types::PaymentOrder;
//!
//! # async fn run() -> Result<(), momo_client::ClientError> {
//! let config = MomoConfig::from_env()?;
//! let collections = CollectionClient::connect(&config).await?;
//!
//! let order = PaymentOrder::new("100", "46733123450", "invoice-1")?;
//! let receipt = collections.request_to_pay(&order).await?;
//! let status = collections.transaction_status(receipt.transaction_ref).await?;
//! println!("{}", status.status);
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod client;
pub mod config;
mod error;
mod http;
pub mod token;

pub use auth::{ApiCredentials, BasicAuthKey, Provisioner};
pub use client::{CollectionClient, DisbursementClient, ProductClient};
pub use config::{MomoConfig, ProductCredentials, SANDBOX_BASE_URL};
pub use error::ClientError;
pub use token::TokenCache;
