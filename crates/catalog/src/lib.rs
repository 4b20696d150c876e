//! `shopledger-catalog` — product/inventory domain.

pub mod product;
pub mod sku;

pub use product::{Product, ProductDraft, ProductUpdate};
pub use sku::generate_sku;
