//! `shopledger-invoicing` — invoice domain.

pub mod invoice;

pub use invoice::{Invoice, InvoiceDraft, InvoiceLine, PaymentMethod};
