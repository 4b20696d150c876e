//! `shopledger-purchasing` — purchase order domain.

pub mod order;

pub use order::{PurchaseOrder, PurchaseOrderDraft, PurchaseOrderLine};
