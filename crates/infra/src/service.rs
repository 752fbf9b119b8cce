//! Save pipeline: validate a draft against the store, then persist it.
//!
//! ```text
//! ProductDraft
//!   ↓
//! 1. Validate every rule (store answers the SKU lookup)
//!   ↓
//! 2. Insert (store re-checks SKU under its write lock)
//!   ↓
//! Product
//! ```
//!
//! A SKU claimed by a concurrent save between steps 1 and 2 is reported the
//! same way as one that was already taken: a `UniquenessViolation` rejection.

use thiserror::Error;
use tracing::{debug, info, warn};

use catalog_core::Entity;
use catalog_products::{Field, Product, ProductDraft, ValidationErrors, Violation};

use crate::product_store::{ProductStore, ProductStoreError};

#[derive(Debug, Error)]
pub enum SaveError {
    /// The record failed one or more rules and was not stored.
    #[error(transparent)]
    Rejected(#[from] ValidationErrors),

    #[error("product store error: {0}")]
    Store(ProductStoreError),
}

impl SaveError {
    pub fn rejection(&self) -> Option<&ValidationErrors> {
        match self {
            SaveError::Rejected(errors) => Some(errors),
            SaveError::Store(_) => None,
        }
    }
}

impl From<ProductStoreError> for SaveError {
    fn from(err: ProductStoreError) -> Self {
        match err {
            ProductStoreError::DuplicateSku(sku) => {
                SaveError::Rejected(ValidationErrors::new(vec![Violation::UniquenessViolation {
                    field: Field::Sku,
                    value: sku.to_string(),
                }]))
            }
            other => SaveError::Store(other),
        }
    }
}

/// Validates and persists products into a [`ProductStore`].
#[derive(Debug)]
pub struct ProductService<S> {
    store: S,
}

impl<S> ProductService<S>
where
    S: ProductStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate `draft` and store it. Nothing is stored on rejection.
    pub fn save(&self, draft: &ProductDraft) -> Result<Product, SaveError> {
        debug!(sku = ?draft.sku, "validating product");

        let product = match draft.validate(&self.store) {
            Ok(product) => product,
            Err(errors) => {
                warn!(
                    sku = ?draft.sku,
                    violations = errors.len(),
                    fields = ?errors.fields(),
                    "product rejected"
                );
                return Err(errors.into());
            }
        };

        if let Err(err) = self.store.insert(product.clone()) {
            warn!(sku = %product.sku(), error = %err, "product insert failed");
            return Err(err.into());
        }

        info!(id = %product.id(), sku = %product.sku(), "product saved");
        Ok(product)
    }

    /// Save each draft in order, returning one outcome per draft.
    pub fn save_all<'a, I>(&self, drafts: I) -> Vec<Result<Product, SaveError>>
    where
        I: IntoIterator<Item = &'a ProductDraft>,
    {
        drafts.into_iter().map(|d| self.save(d)).collect()
    }
}
