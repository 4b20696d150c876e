//! `shopledger-reports` — sales report aggregation.

pub mod sales;

pub use sales::{SalesFilter, SalesSummary, filter_invoices, summarize};
