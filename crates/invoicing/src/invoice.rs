use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shopledger_core::{Cents, DocumentId, DomainError, DomainResult, Entity, tax_on};

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            other => Err(DomainError::validation(format!(
                "unknown payment method '{other}' (expected cash, card, or upi)"
            ))),
        }
    }
}

/// Invoice line item: references the product document it draws stock from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub product_id: DocumentId,
    pub product_name: String,
    pub quantity: u32,
    /// Price in smallest currency unit (cents).
    pub unit_price: Cents,
}

impl InvoiceLine {
    pub fn line_total(&self) -> Cents {
        self.unit_price * Cents::from(self.quantity)
    }
}

/// Invoice form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub customer_name: String,
    pub customer_address: String,
    pub lines: Vec<InvoiceLine>,
    pub payment_method: PaymentMethod,
    pub issued_on: NaiveDate,
}

/// Invoice document with totals computed at creation.
///
/// `issued_on` serializes as an ISO `YYYY-MM-DD` string; the sales report's
/// inclusive date-range bounds compare against it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: DocumentId,
    pub customer_name: String,
    pub customer_address: String,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Cents,
    pub tax: Cents,
    pub total: Cents,
    pub payment_method: PaymentMethod,
    pub issued_on: NaiveDate,
    /// Retrieval URL of the generated printable document, set after upload.
    pub document_url: Option<String>,
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for Invoice {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Invoice {
    /// Compute totals and build the invoice. Stock is not touched here; the
    /// caller decrements product quantities before persisting.
    pub fn create(draft: InvoiceDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        if draft.lines.is_empty() {
            return Err(DomainError::validation("invoice needs at least one line"));
        }
        for (idx, line) in draft.lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(DomainError::validation(format!(
                    "line {}: quantity must be at least 1",
                    idx + 1
                )));
            }
        }

        let subtotal: Cents = draft.lines.iter().map(InvoiceLine::line_total).sum();
        let tax = tax_on(subtotal);
        let total = subtotal + tax;

        Ok(Self {
            id: DocumentId::new(),
            customer_name: draft.customer_name,
            customer_address: draft.customer_address,
            lines: draft.lines,
            subtotal,
            tax,
            total,
            payment_method: draft.payment_method,
            issued_on: draft.issued_on,
            document_url: None,
            delivered: false,
            created_at: now,
        })
    }

    pub fn set_document_url(&mut self, url: impl Into<String>) {
        self.document_url = Some(url.into());
    }

    /// Flip the delivery flag; toggling twice restores the original value.
    pub fn toggle_delivered(&mut self) -> bool {
        self.delivered = !self.delivered;
        self.delivered
    }
}
