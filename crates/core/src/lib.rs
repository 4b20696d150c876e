//! `shopledger-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod revision;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{DocumentId, OwnerId};
pub use money::{Cents, TAX_RATE_PERCENT, format_cents, tax_on};
pub use revision::{ExpectedRevision, Revision};
