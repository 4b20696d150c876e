use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::{Cents, DocumentId, DomainError, DomainResult, Entity};

/// Ordered line item: (brand, product, quantity, unit cost).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub company: String,
    pub product: String,
    pub quantity: u32,
    /// Cost in smallest currency unit (cents).
    pub unit_cost: Cents,
}

impl PurchaseOrderLine {
    pub fn line_total(&self) -> Cents {
        self.unit_cost * Cents::from(self.quantity)
    }
}

/// Purchase order form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderDraft {
    pub supplier_name: String,
    pub supplier_address: String,
    pub supplier_state: String,
    pub lines: Vec<PurchaseOrderLine>,
}

/// Purchase order document: created once via the form, never updated,
/// deletable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: DocumentId,
    pub supplier_name: String,
    pub supplier_address: String,
    pub supplier_state: String,
    pub lines: Vec<PurchaseOrderLine>,
    pub total: Cents,
    pub ordered_at: DateTime<Utc>,
}

impl Entity for PurchaseOrder {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PurchaseOrder {
    pub fn create(draft: PurchaseOrderDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.supplier_name.trim().is_empty() {
            return Err(DomainError::validation("supplier name cannot be empty"));
        }
        if draft.lines.is_empty() {
            return Err(DomainError::validation("purchase order needs at least one line"));
        }
        for (idx, line) in draft.lines.iter().enumerate() {
            if line.product.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "line {}: product cannot be empty",
                    idx + 1
                )));
            }
            if line.quantity == 0 {
                return Err(DomainError::validation(format!(
                    "line {}: quantity must be at least 1",
                    idx + 1
                )));
            }
        }

        let total = draft.lines.iter().map(PurchaseOrderLine::line_total).sum();

        Ok(Self {
            id: DocumentId::new(),
            supplier_name: draft.supplier_name,
            supplier_address: draft.supplier_address,
            supplier_state: draft.supplier_state,
            lines: draft.lines,
            total,
            ordered_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: &str, quantity: u32, unit_cost: Cents) -> PurchaseOrderLine {
        PurchaseOrderLine {
            company: "Acme".to_string(),
            product: product.to_string(),
            quantity,
            unit_cost,
        }
    }

    fn draft(lines: Vec<PurchaseOrderLine>) -> PurchaseOrderDraft {
        PurchaseOrderDraft {
            supplier_name: "Northwind Traders".to_string(),
            supplier_address: "12 Dockside Rd".to_string(),
            supplier_state: "Oregon".to_string(),
            lines,
        }
    }

    #[test]
    fn create_computes_order_total() {
        let po = PurchaseOrder::create(
            draft(vec![line("Widget", 10, 250), line("Gadget", 2, 1_000)]),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(po.total, 10 * 250 + 2 * 1_000);
        assert_eq!(po.lines.len(), 2);
    }

    #[test]
    fn create_rejects_empty_lines() {
        let err = PurchaseOrder::create(draft(vec![]), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_blank_supplier() {
        let mut d = draft(vec![line("Widget", 1, 100)]);
        d.supplier_name = "  ".to_string();
        let err = PurchaseOrder::create(d, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_zero_quantity_line() {
        let err =
            PurchaseOrder::create(draft(vec![line("Widget", 0, 100)]), Utc::now()).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("line 1")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
