//! In-memory sales report filtering.
//!
//! Operates over the owner's already-fetched invoices; no pagination.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shopledger_core::Cents;
use shopledger_invoicing::{Invoice, PaymentMethod};

/// Sales report filter. Absent fields are unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesFilter {
    /// Inclusive lower bound on `issued_on`.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on `issued_on`.
    pub to: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    /// Free-text match against invoice id, customer name, or any line's
    /// product name or product id. Case-insensitive.
    pub query: Option<String>,
}

/// Aggregate totals over the matching invoices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub count: usize,
    pub subtotal: Cents,
    pub tax: Cents,
    pub total: Cents,
}

/// Apply the filter, preserving input order.
pub fn filter_invoices<'a>(invoices: &'a [Invoice], filter: &SalesFilter) -> Vec<&'a Invoice> {
    invoices.iter().filter(|inv| matches(inv, filter)).collect()
}

/// Totals over a filtered set.
pub fn summarize(invoices: &[&Invoice]) -> SalesSummary {
    invoices.iter().fold(SalesSummary::default(), |mut acc, inv| {
        acc.count += 1;
        acc.subtotal += inv.subtotal;
        acc.tax += inv.tax;
        acc.total += inv.total;
        acc
    })
}

fn matches(invoice: &Invoice, filter: &SalesFilter) -> bool {
    if let Some(from) = filter.from {
        if invoice.issued_on < from {
            return false;
        }
    }
    if let Some(to) = filter.to {
        if invoice.issued_on > to {
            return false;
        }
    }
    if let Some(method) = filter.payment_method {
        if invoice.payment_method != method {
            return false;
        }
    }
    if let Some(query) = &filter.query {
        let needle = query.trim().to_lowercase();
        if !needle.is_empty() && !matches_text(invoice, &needle) {
            return false;
        }
    }
    true
}

fn matches_text(invoice: &Invoice, needle: &str) -> bool {
    if invoice.id.to_string().to_lowercase().contains(needle) {
        return true;
    }
    if invoice.customer_name.to_lowercase().contains(needle) {
        return true;
    }
    invoice.lines.iter().any(|line| {
        line.product_name.to_lowercase().contains(needle)
            || line.product_id.to_string().to_lowercase().contains(needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shopledger_core::DocumentId;
    use shopledger_invoicing::{InvoiceDraft, InvoiceLine};

    fn invoice(customer: &str, product: &str, issued_on: &str, method: PaymentMethod) -> Invoice {
        Invoice::create(
            InvoiceDraft {
                customer_name: customer.to_string(),
                customer_address: String::new(),
                lines: vec![InvoiceLine {
                    product_id: DocumentId::new(),
                    product_name: product.to_string(),
                    quantity: 2,
                    unit_price: 100,
                }],
                payment_method: method,
                issued_on: issued_on.parse().unwrap(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    fn fixture() -> Vec<Invoice> {
        vec![
            invoice("Jordan Lee", "Widget", "2024-03-10", PaymentMethod::Cash),
            invoice("Sam Ortiz", "Gadget", "2024-03-20", PaymentMethod::Card),
            invoice("Ana Weiss", "Widget", "2024-04-05", PaymentMethod::Upi),
        ]
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn no_filter_matches_everything() {
        let invoices = fixture();
        let got = filter_invoices(&invoices, &SalesFilter::default());
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let invoices = fixture();
        let filter = SalesFilter {
            from: Some(date("2024-03-10")),
            to: Some(date("2024-03-20")),
            ..Default::default()
        };
        let got = filter_invoices(&invoices, &filter);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].customer_name, "Jordan Lee");
        assert_eq!(got[1].customer_name, "Sam Ortiz");
    }

    #[test]
    fn excluding_range_yields_empty_set_and_zero_totals() {
        let invoices = fixture();
        let filter = SalesFilter {
            from: Some(date("2020-01-01")),
            to: Some(date("2020-12-31")),
            ..Default::default()
        };
        let got = filter_invoices(&invoices, &filter);
        assert!(got.is_empty());
        assert_eq!(summarize(&got), SalesSummary::default());
    }

    #[test]
    fn payment_method_is_exact_match() {
        let invoices = fixture();
        let filter = SalesFilter {
            payment_method: Some(PaymentMethod::Card),
            ..Default::default()
        };
        let got = filter_invoices(&invoices, &filter);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].customer_name, "Sam Ortiz");
    }

    #[test]
    fn free_text_matches_customer_product_and_id() {
        let invoices = fixture();

        let by_customer = filter_invoices(
            &invoices,
            &SalesFilter {
                query: Some("ortiz".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_customer.len(), 1);

        let by_product = filter_invoices(
            &invoices,
            &SalesFilter {
                query: Some("widget".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_product.len(), 2);

        let id_prefix = invoices[0].id.to_string()[..12].to_string();
        let by_id = filter_invoices(
            &invoices,
            &SalesFilter {
                query: Some(id_prefix),
                ..Default::default()
            },
        );
        assert!(by_id.iter().any(|inv| inv.id == invoices[0].id));
    }

    #[test]
    fn blank_query_is_ignored() {
        let invoices = fixture();
        let got = filter_invoices(
            &invoices,
            &SalesFilter {
                query: Some("   ".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn summary_totals_add_up() {
        let invoices = fixture();
        let got = filter_invoices(&invoices, &SalesFilter::default());
        let summary = summarize(&got);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.subtotal, 600);
        assert_eq!(summary.tax, 108);
        assert_eq!(summary.total, 708);
    }
}
