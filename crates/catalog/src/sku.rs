//! SKU token generation.

use uuid::Uuid;

/// Generate a fresh stock-keeping token, e.g. `SKU-9F3A2C7B`.
///
/// Tokens are derived from the random tail of a UUIDv7 so two products
/// created in the same instant still diverge.
pub fn generate_sku() -> String {
    let hex = Uuid::now_v7().simple().to_string();
    // Last 8 hex chars are purely random bits.
    let tail = &hex[hex.len() - 8..];
    format!("SKU-{}", tail.to_uppercase())
}
