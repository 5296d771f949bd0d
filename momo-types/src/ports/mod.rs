//! Port traits (interfaces the client is generic over).
//!
//! A MoMo product line is described once as a type implementing
//! [`Product`]; the HTTP client is written against the trait.

mod product;

pub use product::{CollectionProduct, DisbursementProduct, PartyRole, Product};
