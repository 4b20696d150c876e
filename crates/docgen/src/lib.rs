//! `shopledger-docgen` — printable HTML documents.
//!
//! Fixed layouts the browser print dialog consumes as-is. Rendering is plain
//! string building with escaping; two fixed documents do not justify a
//! templating engine.

mod escape;
pub mod invoice_doc;
pub mod purchase_order_doc;

pub use invoice_doc::render_invoice;
pub use purchase_order_doc::render_purchase_order;
