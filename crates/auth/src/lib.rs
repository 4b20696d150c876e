//! `shopledger-auth` — authentication boundary.
//!
//! Claims are transport-agnostic; token encoding/decoding is isolated behind
//! the `TokenValidator` trait so the HTTP layer never touches JWT internals.

pub mod claims;
pub mod principal;
pub mod token;

pub use claims::{AccessClaims, TokenValidationError, validate_claims};
pub use principal::PrincipalId;
pub use token::{Hs256TokenValidator, TokenValidator, mint_hs256};
