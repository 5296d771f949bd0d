//! Domain value types for the MoMo API.

pub mod amount;
pub mod environment;
pub mod party;
pub mod reference;
pub mod status;

pub use amount::{Amount, Currency};
pub use environment::TargetEnvironment;
pub use party::{Party, PartyIdType};
pub use reference::{ApiUserId, TransactionRef};
pub use status::TransactionStatus;
