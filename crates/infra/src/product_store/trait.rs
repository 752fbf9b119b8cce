use std::sync::Arc;

use thiserror::Error;

use catalog_products::{Product, ProductId, Sku, SkuLookup};

/// Product store operation error.
///
/// These are **infrastructure errors** (storage, index conflicts) as opposed
/// to validation failures, which never reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductStoreError {
    /// The SKU unique index already holds this value.
    #[error("duplicate key: SKU {0} already exists")]
    DuplicateSku(Sku),

    /// The document id is already taken.
    #[error("duplicate key: _id {0} already exists")]
    DuplicateId(ProductId),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Collection of validated products with a unique index on SKU.
///
/// Every store is also a [`SkuLookup`], so it can be handed straight to
/// validation.
pub trait ProductStore: SkuLookup + Send + Sync {
    /// Insert a product. Fails without side effects if the SKU or id is taken.
    fn insert(&self, product: Product) -> Result<(), ProductStoreError>;

    fn get(&self, id: ProductId) -> Result<Option<Product>, ProductStoreError>;

    fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, ProductStoreError>;

    /// All products, ordered by id.
    fn list(&self) -> Result<Vec<Product>, ProductStoreError>;

    fn count(&self) -> Result<usize, ProductStoreError>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn insert(&self, product: Product) -> Result<(), ProductStoreError> {
        (**self).insert(product)
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, ProductStoreError> {
        (**self).get(id)
    }

    fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, ProductStoreError> {
        (**self).find_by_sku(sku)
    }

    fn list(&self) -> Result<Vec<Product>, ProductStoreError> {
        (**self).list()
    }

    fn count(&self) -> Result<usize, ProductStoreError> {
        (**self).count()
    }
}
