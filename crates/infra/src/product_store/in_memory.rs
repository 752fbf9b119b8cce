use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use catalog_core::Entity;
use catalog_products::{LookupError, Product, ProductId, Sku, SkuLookup};

use super::r#trait::{ProductStore, ProductStoreError};

#[derive(Debug, Default)]
struct Collection {
    documents: BTreeMap<ProductId, Product>,
    sku_index: HashMap<Sku, ProductId>,
}

/// In-memory product collection.
///
/// Intended for tests/dev. The document map and the SKU index live behind a
/// single lock, so an insert checks and claims its SKU atomically.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Collection>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ProductStoreError {
    ProductStoreError::Unavailable("lock poisoned".to_string())
}

impl SkuLookup for InMemoryProductStore {
    fn sku_exists(&self, sku: &Sku) -> Result<bool, LookupError> {
        let collection = self
            .inner
            .read()
            .map_err(|_| LookupError("lock poisoned".to_string()))?;
        Ok(collection.sku_index.contains_key(sku))
    }
}

impl ProductStore for InMemoryProductStore {
    fn insert(&self, product: Product) -> Result<(), ProductStoreError> {
        let mut collection = self.inner.write().map_err(|_| poisoned())?;

        if collection.sku_index.contains_key(product.sku()) {
            return Err(ProductStoreError::DuplicateSku(product.sku().clone()));
        }
        let id = *product.id();
        if collection.documents.contains_key(&id) {
            return Err(ProductStoreError::DuplicateId(id));
        }

        collection.sku_index.insert(product.sku().clone(), id);
        collection.documents.insert(id, product);
        Ok(())
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, ProductStoreError> {
        let collection = self.inner.read().map_err(|_| poisoned())?;
        Ok(collection.documents.get(&id).cloned())
    }

    fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, ProductStoreError> {
        let collection = self.inner.read().map_err(|_| poisoned())?;
        Ok(collection
            .sku_index
            .get(sku)
            .and_then(|id| collection.documents.get(id))
            .cloned())
    }

    fn list(&self) -> Result<Vec<Product>, ProductStoreError> {
        let collection = self.inner.read().map_err(|_| poisoned())?;
        Ok(collection.documents.values().cloned().collect())
    }

    fn count(&self) -> Result<usize, ProductStoreError> {
        let collection = self.inner.read().map_err(|_| poisoned())?;
        Ok(collection.documents.len())
    }
}
