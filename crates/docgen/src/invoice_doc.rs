//! Printable invoice document.

use shopledger_core::format_cents;
use shopledger_invoicing::Invoice;
use shopledger_profile::ShopProfile;

use crate::escape::escape_html;

/// Render the invoice as a self-contained printable HTML page.
pub fn render_invoice(profile: &ShopProfile, invoice: &Invoice) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    html.push_str("<title>Invoice ");
    html.push_str(&escape_html(&invoice.id.to_string()));
    html.push_str("</title>");
    html.push_str(
        "<style>body{font-family:sans-serif;margin:2rem}table{width:100%;border-collapse:collapse}\
         th,td{border:1px solid #444;padding:.4rem;text-align:left}.totals{margin-top:1rem;\
         text-align:right}.muted{color:#666}</style></head><body>",
    );

    html.push_str("<h1>");
    html.push_str(&escape_html(&profile.shop_name));
    html.push_str("</h1>");
    if !profile.address.is_empty() {
        html.push_str("<p class=\"muted\">");
        html.push_str(&escape_html(&profile.address));
        html.push_str("</p>");
    }
    if !profile.tax_number.is_empty() {
        html.push_str("<p class=\"muted\">Tax no: ");
        html.push_str(&escape_html(&profile.tax_number));
        html.push_str("</p>");
    }

    html.push_str("<h2>Invoice ");
    html.push_str(&escape_html(&invoice.id.to_string()));
    html.push_str("</h2><p>Date: ");
    html.push_str(&invoice.issued_on.format("%Y-%m-%d").to_string());
    html.push_str("</p><p>Billed to: ");
    html.push_str(&escape_html(&invoice.customer_name));
    if !invoice.customer_address.is_empty() {
        html.push_str(", ");
        html.push_str(&escape_html(&invoice.customer_address));
    }
    html.push_str("</p><p>Payment method: ");
    html.push_str(invoice.payment_method.as_str());
    html.push_str("</p>");

    html.push_str("<table><thead><tr><th>Product</th><th>Qty</th><th>Unit price</th><th>Amount</th></tr></thead><tbody>");
    for line in &invoice.lines {
        html.push_str("<tr><td>");
        html.push_str(&escape_html(&line.product_name));
        html.push_str("</td><td>");
        html.push_str(&line.quantity.to_string());
        html.push_str("</td><td>");
        html.push_str(&format_cents(line.unit_price));
        html.push_str("</td><td>");
        html.push_str(&format_cents(line.line_total()));
        html.push_str("</td></tr>");
    }
    html.push_str("</tbody></table>");

    html.push_str("<div class=\"totals\"><p>Subtotal: ");
    html.push_str(&format_cents(invoice.subtotal));
    html.push_str("</p><p>Tax (18%): ");
    html.push_str(&format_cents(invoice.tax));
    html.push_str("</p><p><strong>Total: ");
    html.push_str(&format_cents(invoice.total));
    html.push_str("</strong></p></div>");

    html.push_str("</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shopledger_core::{DocumentId, OwnerId};
    use shopledger_invoicing::{InvoiceDraft, InvoiceLine, PaymentMethod};

    fn fixture() -> (ShopProfile, Invoice) {
        let mut profile = ShopProfile::default_for(OwnerId::new(), Utc::now());
        profile.shop_name = "Acme Hardware".to_string();
        profile.tax_number = "TX-991".to_string();

        let invoice = Invoice::create(
            InvoiceDraft {
                customer_name: "Jordan <Lee>".to_string(),
                customer_address: "44 Elm St".to_string(),
                lines: vec![InvoiceLine {
                    product_id: DocumentId::new(),
                    product_name: "Widget".to_string(),
                    quantity: 2,
                    unit_price: 100,
                }],
                payment_method: PaymentMethod::Cash,
                issued_on: "2024-03-15".parse().unwrap(),
            },
            Utc::now(),
        )
        .unwrap();

        (profile, invoice)
    }

    #[test]
    fn renders_shop_header_and_totals() {
        let (profile, invoice) = fixture();
        let html = render_invoice(&profile, &invoice);

        assert!(html.contains("Acme Hardware"));
        assert!(html.contains("TX-991"));
        assert!(html.contains("Subtotal: 2.00"));
        assert!(html.contains("Tax (18%): 0.36"));
        assert!(html.contains("Total: 2.36"));
    }

    #[test]
    fn escapes_customer_supplied_text() {
        let (profile, invoice) = fixture();
        let html = render_invoice(&profile, &invoice);
        assert!(html.contains("Jordan &lt;Lee&gt;"));
        assert!(!html.contains("Jordan <Lee>"));
    }

    #[test]
    fn includes_every_line() {
        let (profile, invoice) = fixture();
        let html = render_invoice(&profile, &invoice);
        assert!(html.contains("<td>Widget</td>"));
        assert!(html.contains("2024-03-15"));
    }
}
