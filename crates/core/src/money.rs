//! Monetary amounts in smallest currency unit (cents).
//!
//! Integer cents everywhere; floats never enter money math.

/// Amount in smallest currency unit.
pub type Cents = u64;

/// Sales tax applied to invoice subtotals, in percent.
pub const TAX_RATE_PERCENT: Cents = 18;

/// Tax owed on a subtotal, truncated to whole cents.
pub fn tax_on(subtotal: Cents) -> Cents {
    subtotal * TAX_RATE_PERCENT / 100
}

/// Render cents as a decimal string, e.g. `1050` -> `"10.50"`.
pub fn format_cents(amount: Cents) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}
