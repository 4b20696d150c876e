//! Printable purchase order document.

use shopledger_core::format_cents;
use shopledger_profile::ShopProfile;
use shopledger_purchasing::PurchaseOrder;

use crate::escape::escape_html;

/// Render the purchase order as a self-contained printable HTML page.
pub fn render_purchase_order(profile: &ShopProfile, order: &PurchaseOrder) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    html.push_str("<title>Purchase Order ");
    html.push_str(&escape_html(&order.id.to_string()));
    html.push_str("</title>");
    html.push_str(
        "<style>body{font-family:sans-serif;margin:2rem}table{width:100%;border-collapse:collapse}\
         th,td{border:1px solid #444;padding:.4rem;text-align:left}.totals{margin-top:1rem;\
         text-align:right}.muted{color:#666}</style></head><body>",
    );

    html.push_str("<h1>");
    html.push_str(&escape_html(&profile.shop_name));
    html.push_str("</h1><h2>Purchase Order ");
    html.push_str(&escape_html(&order.id.to_string()));
    html.push_str("</h2>");

    html.push_str("<p>Supplier: ");
    html.push_str(&escape_html(&order.supplier_name));
    html.push_str("</p><p class=\"muted\">");
    html.push_str(&escape_html(&order.supplier_address));
    if !order.supplier_state.is_empty() {
        html.push_str(", ");
        html.push_str(&escape_html(&order.supplier_state));
    }
    html.push_str("</p><p>Ordered: ");
    html.push_str(&order.ordered_at.format("%Y-%m-%d").to_string());
    html.push_str("</p>");

    html.push_str("<table><thead><tr><th>Brand</th><th>Product</th><th>Qty</th><th>Unit cost</th><th>Amount</th></tr></thead><tbody>");
    for line in &order.lines {
        html.push_str("<tr><td>");
        html.push_str(&escape_html(&line.company));
        html.push_str("</td><td>");
        html.push_str(&escape_html(&line.product));
        html.push_str("</td><td>");
        html.push_str(&line.quantity.to_string());
        html.push_str("</td><td>");
        html.push_str(&format_cents(line.unit_cost));
        html.push_str("</td><td>");
        html.push_str(&format_cents(line.line_total()));
        html.push_str("</td></tr>");
    }
    html.push_str("</tbody></table>");

    html.push_str("<div class=\"totals\"><p><strong>Order total: ");
    html.push_str(&format_cents(order.total));
    html.push_str("</strong></p></div>");

    html.push_str("</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shopledger_core::OwnerId;
    use shopledger_purchasing::{PurchaseOrderDraft, PurchaseOrderLine};

    #[test]
    fn renders_supplier_lines_and_total() {
        let profile = ShopProfile::default_for(OwnerId::new(), Utc::now());
        let order = PurchaseOrder::create(
            PurchaseOrderDraft {
                supplier_name: "Northwind & Co".to_string(),
                supplier_address: "12 Dockside Rd".to_string(),
                supplier_state: "Oregon".to_string(),
                lines: vec![PurchaseOrderLine {
                    company: "Acme".to_string(),
                    product: "Widget".to_string(),
                    quantity: 10,
                    unit_cost: 250,
                }],
            },
            Utc::now(),
        )
        .unwrap();

        let html = render_purchase_order(&profile, &order);
        assert!(html.contains("Northwind &amp; Co"));
        assert!(html.contains("<td>Widget</td>"));
        assert!(html.contains("Order total: 25.00"));
    }
}
