use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::{Cents, DocumentId, DomainError, DomainResult, Entity};

use crate::sku::generate_sku;

/// Product document: one per (company, name) pair within an owner namespace.
///
/// Quantity is unsigned on purpose: on-hand stock can never go negative, so
/// the type refuses to represent the broken state instead of checking for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: DocumentId,
    pub sku: String,
    pub company: String,
    pub name: String,
    /// Price in smallest currency unit (cents).
    pub unit_price: Cents,
    pub quantity: u32,
    pub description: String,
    pub purchased_at: DateTime<Utc>,
}

/// Inventory form input for create-or-restock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub company: String,
    pub name: String,
    pub unit_price: Cents,
    pub quantity: u32,
    pub description: String,
}

/// Direct edit of an existing product (inventory table row edit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub unit_price: Option<Cents>,
    pub quantity: Option<u32>,
    pub description: Option<String>,
}

impl Entity for Product {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    /// Create a new product with a freshly generated SKU.
    pub fn create(draft: ProductDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.company.trim().is_empty() {
            return Err(DomainError::validation("company cannot be empty"));
        }
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if draft.quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }

        Ok(Self {
            id: DocumentId::new(),
            sku: generate_sku(),
            company: draft.company,
            name: draft.name,
            unit_price: draft.unit_price,
            quantity: draft.quantity,
            description: draft.description,
            purchased_at: now,
        })
    }

    /// Restock key comparison: same (company, name), case-insensitive.
    pub fn matches(&self, company: &str, name: &str) -> bool {
        self.company.eq_ignore_ascii_case(company.trim())
            && self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Quantity-additive update: re-submitting a known (company, name) pair
    /// adds the entered quantity and refreshes price/description.
    pub fn restock(&mut self, draft: &ProductDraft, now: DateTime<Utc>) -> DomainResult<()> {
        if draft.quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        self.quantity = self
            .quantity
            .checked_add(draft.quantity)
            .ok_or_else(|| DomainError::invariant("quantity overflow"))?;
        self.unit_price = draft.unit_price;
        if !draft.description.is_empty() {
            self.description = draft.description.clone();
        }
        self.purchased_at = now;
        Ok(())
    }

    /// Conditional decrement: fails when on-hand stock is insufficient.
    pub fn deduct(&mut self, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("deduction quantity must be at least 1"));
        }
        if quantity > self.quantity {
            return Err(DomainError::conflict(format!(
                "insufficient stock for '{}': requested {}, on hand {}",
                self.name, quantity, self.quantity
            )));
        }
        self.quantity -= quantity;
        Ok(())
    }

    pub fn edit(&mut self, update: ProductUpdate) {
        if let Some(v) = update.unit_price {
            self.unit_price = v;
        }
        if let Some(v) = update.quantity {
            self.quantity = v;
        }
        if let Some(v) = update.description {
            self.description = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(company: &str, name: &str, quantity: u32) -> ProductDraft {
        ProductDraft {
            company: company.to_string(),
            name: name.to_string(),
            unit_price: 10_000,
            quantity,
            description: "test".to_string(),
        }
    }

    #[test]
    fn create_assigns_fresh_sku_and_quantity() {
        let p = Product::create(draft("Acme", "Widget", 5), Utc::now()).unwrap();
        assert!(p.sku.starts_with("SKU-"));
        assert_eq!(p.quantity, 5);
        assert_eq!(p.company, "Acme");
    }

    #[test]
    fn create_rejects_blank_company_or_name() {
        assert!(matches!(
            Product::create(draft("  ", "Widget", 5), Utc::now()).unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            Product::create(draft("Acme", "", 5), Utc::now()).unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn create_rejects_zero_quantity() {
        let err = Product::create(draft("Acme", "Widget", 0), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn matches_is_case_insensitive_and_trims() {
        let p = Product::create(draft("Acme", "Widget", 5), Utc::now()).unwrap();
        assert!(p.matches("acme", "WIDGET"));
        assert!(p.matches(" Acme ", " widget "));
        assert!(!p.matches("Acme", "Gadget"));
    }

    #[test]
    fn restock_is_quantity_additive() {
        let mut p = Product::create(draft("Acme", "Widget", 5), Utc::now()).unwrap();
        p.restock(&draft("Acme", "Widget", 3), Utc::now()).unwrap();
        assert_eq!(p.quantity, 8);
    }

    #[test]
    fn restock_refreshes_price() {
        let mut p = Product::create(draft("Acme", "Widget", 5), Utc::now()).unwrap();
        let mut d = draft("Acme", "Widget", 1);
        d.unit_price = 12_500;
        p.restock(&d, Utc::now()).unwrap();
        assert_eq!(p.unit_price, 12_500);
    }

    #[test]
    fn restock_keeps_description_when_entry_is_blank() {
        let mut p = Product::create(draft("Acme", "Widget", 5), Utc::now()).unwrap();
        let mut d = draft("Acme", "Widget", 1);
        d.description = String::new();
        p.restock(&d, Utc::now()).unwrap();
        assert_eq!(p.description, "test");
    }

    #[test]
    fn deduct_reduces_stock() {
        let mut p = Product::create(draft("Acme", "Widget", 5), Utc::now()).unwrap();
        p.deduct(2).unwrap();
        assert_eq!(p.quantity, 3);
    }

    #[test]
    fn deduct_rejects_insufficient_stock() {
        let mut p = Product::create(draft("Acme", "Widget", 5), Utc::now()).unwrap();
        let err = p.deduct(6).unwrap_err();
        match err {
            DomainError::Conflict(msg) => {
                assert!(msg.contains("Widget"));
                assert!(msg.contains("insufficient stock"));
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
        // Failed deduct leaves quantity untouched.
        assert_eq!(p.quantity, 5);
    }

    #[test]
    fn deduct_to_exactly_zero_is_allowed() {
        let mut p = Product::create(draft("Acme", "Widget", 5), Utc::now()).unwrap();
        p.deduct(5).unwrap();
        assert_eq!(p.quantity, 0);
        assert!(p.deduct(1).is_err());
    }

    #[test]
    fn edit_overwrites_only_given_fields() {
        let mut p = Product::create(draft("Acme", "Widget", 5), Utc::now()).unwrap();
        p.edit(ProductUpdate {
            quantity: Some(9),
            ..Default::default()
        });
        assert_eq!(p.quantity, 9);
        assert_eq!(p.unit_price, 10_000);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: restock then deduct of the same amount is a no-op on quantity.
            #[test]
            fn restock_then_deduct_round_trips(initial in 1u32..10_000, delta in 1u32..10_000) {
                let mut p = Product::create(draft("Acme", "Widget", initial), Utc::now()).unwrap();
                p.restock(&draft("Acme", "Widget", delta), Utc::now()).unwrap();
                p.deduct(delta).unwrap();
                prop_assert_eq!(p.quantity, initial);
            }

            /// Property: deduct never drives quantity negative; it either
            /// succeeds with the exact remainder or fails leaving state intact.
            #[test]
            fn deduct_never_goes_negative(initial in 0u32..10_000, requested in 1u32..20_000) {
                let mut p = Product {
                    id: DocumentId::new(),
                    sku: generate_sku(),
                    company: "Acme".to_string(),
                    name: "Widget".to_string(),
                    unit_price: 100,
                    quantity: initial,
                    description: String::new(),
                    purchased_at: Utc::now(),
                };

                match p.deduct(requested) {
                    Ok(()) => {
                        prop_assert!(requested <= initial);
                        prop_assert_eq!(p.quantity, initial - requested);
                    }
                    Err(_) => {
                        prop_assert!(requested > initial);
                        prop_assert_eq!(p.quantity, initial);
                    }
                }
            }
        }
    }
}
