//! # MoMo Types
//!
//! Domain types and port traits for the MTN Mobile Money API client.
//! This crate has ZERO IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Layout
//!
//! - `domain/` - Validated value types (Amount, Currency, Party, references)
//! - `ports/` - The `Product` trait describing a MoMo product line
//! - `dto/` - Request and response bodies as they appear on the wire
//! - `error/` - Validation errors

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Amount, ApiUserId, Currency, Party, PartyIdType, TargetEnvironment, TransactionRef,
    TransactionStatus,
};
pub use dto::*;
pub use error::ValidationError;
pub use ports::{CollectionProduct, DisbursementProduct, PartyRole, Product};
