//! Collection bindings for the domain types.
//!
//! Collection names are the persistence contract: changing one orphans every
//! document already stored under it.

use shopledger_core::{DocumentId, OwnerId};
use shopledger_expenses::Expense;
use shopledger_invoicing::Invoice;
use shopledger_profile::ShopProfile;
use shopledger_purchasing::PurchaseOrder;

use crate::repository::DocumentModel;

impl DocumentModel for shopledger_catalog::Product {
    const COLLECTION: &'static str = "products";

    fn document_id(&self) -> DocumentId {
        self.id
    }
}

impl DocumentModel for Invoice {
    const COLLECTION: &'static str = "invoices";

    fn document_id(&self) -> DocumentId {
        self.id
    }
}

impl DocumentModel for PurchaseOrder {
    const COLLECTION: &'static str = "purchase_orders";

    fn document_id(&self) -> DocumentId {
        self.id
    }
}

impl DocumentModel for Expense {
    const COLLECTION: &'static str = "expenses";

    fn document_id(&self) -> DocumentId {
        self.id
    }
}

impl DocumentModel for ShopProfile {
    const COLLECTION: &'static str = "profile";

    fn document_id(&self) -> DocumentId {
        profile_document_id(self.owner_id)
    }
}

/// The profile is a singleton per owner, stored under a document id derived
/// from the owner id itself.
pub fn profile_document_id(owner_id: OwnerId) -> DocumentId {
    DocumentId::from_uuid(*owner_id.as_uuid())
}
