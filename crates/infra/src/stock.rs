use shopledger_catalog::Product;
use shopledger_core::{DocumentId, DomainError, ExpectedRevision, OwnerId};
use thiserror::Error;

use crate::document_store::StoreError;
use crate::repository::Repository;

/// Bounded retries for the compare-and-swap loop. A conflict means another
/// writer committed in between, so retrying against the fresh revision is
/// always sound; the bound only guards against pathological contention.
const MAX_RETRIES: u32 = 32;

#[derive(Debug, Error)]
pub enum StockError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stock adjustment for product {0} did not settle after {MAX_RETRIES} attempts")]
    Contended(DocumentId),
}

/// Revision-checked stock mutations.
///
/// Every adjustment re-reads the product, applies the mutation, and writes
/// back with the exact revision it read. A concurrent writer surfaces as a
/// revision conflict and the adjustment retries from a fresh read, so two
/// overlapping sales can never both consume the same units.
#[derive(Clone)]
pub struct StockLedger {
    products: Repository<Product>,
}

impl StockLedger {
    pub fn new(products: Repository<Product>) -> Self {
        Self { products }
    }

    /// Atomically removes `quantity` units, failing without a write when
    /// on-hand stock is insufficient.
    pub fn deduct(
        &self,
        owner_id: OwnerId,
        product_id: DocumentId,
        quantity: u32,
    ) -> Result<Product, StockError> {
        self.adjust(owner_id, product_id, |product| product.deduct(quantity))
    }

    /// Atomically adds `quantity` units back. Used to unwind a partially
    /// applied multi-line deduction.
    pub fn replenish(
        &self,
        owner_id: OwnerId,
        product_id: DocumentId,
        quantity: u32,
    ) -> Result<Product, StockError> {
        self.adjust(owner_id, product_id, |product| {
            product.quantity = product
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| DomainError::invariant("quantity overflow"))?;
            Ok(())
        })
    }

    /// Read-mutate-write loop with revision checking.
    pub fn adjust(
        &self,
        owner_id: OwnerId,
        product_id: DocumentId,
        mutate: impl Fn(&mut Product) -> shopledger_core::DomainResult<()>,
    ) -> Result<Product, StockError> {
        for _ in 0..MAX_RETRIES {
            let Some((mut product, revision)) = self.products.get(owner_id, product_id)? else {
                return Err(DomainError::not_found().into());
            };

            mutate(&mut product)?;

            match self
                .products
                .update(owner_id, &product, ExpectedRevision::Exact(revision))
            {
                Ok(_) => return Ok(product),
                Err(StoreError::RevisionConflict(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        }

        Err(StockError::Contended(product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CollectionCache;
    use crate::document_store::InMemoryDocumentStore;
    use chrono::Utc;
    use shopledger_catalog::ProductDraft;
    use std::sync::Arc;

    fn ledger_with_product(quantity: u32) -> (StockLedger, OwnerId, DocumentId) {
        let repo: Repository<Product> = Repository::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(CollectionCache::new()),
        );
        let owner = OwnerId::new();
        let product = Product::create(
            ProductDraft {
                company: "Acme".to_string(),
                name: "Widget".to_string(),
                unit_price: 10_000,
                quantity,
                description: String::new(),
            },
            Utc::now(),
        )
        .unwrap();
        let id = product.id;
        repo.insert(owner, &product).unwrap();
        (StockLedger::new(repo), owner, id)
    }

    #[test]
    fn deduct_persists_the_new_quantity() {
        let (ledger, owner, id) = ledger_with_product(8);
        let product = ledger.deduct(owner, id, 3).unwrap();
        assert_eq!(product.quantity, 5);

        let (reloaded, _) = ledger.products.get(owner, id).unwrap().unwrap();
        assert_eq!(reloaded.quantity, 5);
    }

    #[test]
    fn insufficient_stock_is_rejected_without_a_write() {
        let (ledger, owner, id) = ledger_with_product(2);
        let err = ledger.deduct(owner, id, 3).unwrap_err();
        assert!(matches!(err, StockError::Domain(DomainError::Conflict(_))));

        let (reloaded, _) = ledger.products.get(owner, id).unwrap().unwrap();
        assert_eq!(reloaded.quantity, 2);
    }

    #[test]
    fn replenish_unwinds_a_deduction() {
        let (ledger, owner, id) = ledger_with_product(5);
        ledger.deduct(owner, id, 4).unwrap();
        let product = ledger.replenish(owner, id, 4).unwrap();
        assert_eq!(product.quantity, 5);
    }

    #[test]
    fn missing_product_surfaces_not_found() {
        let (ledger, owner, _) = ledger_with_product(1);
        let err = ledger.deduct(owner, DocumentId::new(), 1).unwrap_err();
        assert!(matches!(err, StockError::Domain(DomainError::NotFound)));
    }

    #[test]
    fn concurrent_deductions_never_lose_an_update() {
        let (ledger, owner, id) = ledger_with_product(64);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = ledger.clone();
                std::thread::spawn(move || {
                    for _ in 0..8 {
                        ledger.deduct(owner, id, 1).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let (product, _) = ledger.products.get(owner, id).unwrap().unwrap();
        assert_eq!(product.quantity, 0);
    }
}
