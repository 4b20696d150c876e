use std::sync::Arc;

use chrono::Utc;

use shopledger_catalog::Product;
use shopledger_core::{OwnerId, Revision};
use shopledger_expenses::Expense;
use shopledger_infra::{
    profile_document_id, CollectionCache, DocumentStore, InMemoryDocumentStore,
    InMemoryObjectStore, ObjectStore, Repository, StockLedger, StoreError,
};
use shopledger_invoicing::Invoice;
use shopledger_profile::ShopProfile;
use shopledger_purchasing::PurchaseOrder;

/// All wired infrastructure, shared by every handler via `Extension`.
///
/// One document store and one listing cache back every repository, so a
/// write through any repository invalidates exactly the listings it touched.
pub struct AppServices {
    pub products: Repository<Product>,
    pub invoices: Repository<Invoice>,
    pub purchase_orders: Repository<PurchaseOrder>,
    pub expenses: Repository<Expense>,
    pub profiles: Repository<ShopProfile>,
    pub stock: StockLedger,
    pub objects: Arc<dyn ObjectStore>,
}

/// Build the in-memory service graph.
pub fn build_services() -> AppServices {
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
    let cache = Arc::new(CollectionCache::new());

    let products = Repository::<Product>::new(Arc::clone(&store), Arc::clone(&cache));
    let invoices = Repository::<Invoice>::new(Arc::clone(&store), Arc::clone(&cache));
    let purchase_orders = Repository::<PurchaseOrder>::new(Arc::clone(&store), Arc::clone(&cache));
    let expenses = Repository::<Expense>::new(Arc::clone(&store), Arc::clone(&cache));
    let profiles = Repository::<ShopProfile>::new(Arc::clone(&store), Arc::clone(&cache));

    let stock = StockLedger::new(products.clone());

    AppServices {
        products,
        invoices,
        purchase_orders,
        expenses,
        profiles,
        stock,
        objects: Arc::new(InMemoryObjectStore::new()),
    }
}

impl AppServices {
    /// The owner's stored profile, or defaults when none exists yet.
    ///
    /// The revision is `None` exactly when the defaults were served, which
    /// tells the caller whether a save should insert or update.
    pub fn profile_or_default(
        &self,
        owner_id: OwnerId,
    ) -> Result<(ShopProfile, Option<Revision>), StoreError> {
        match self.profiles.get(owner_id, profile_document_id(owner_id))? {
            Some((profile, revision)) => Ok((profile, Some(revision))),
            None => Ok((ShopProfile::default_for(owner_id, Utc::now()), None)),
        }
    }
}
