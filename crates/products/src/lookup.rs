//! SKU uniqueness lookup capability.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::values::Sku;

/// The lookup could not answer (backing store unavailable, lock poisoned...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sku lookup failed: {0}")]
pub struct LookupError(pub String);

/// Answers whether a SKU is already taken by a persisted product.
///
/// Owned by the persistence layer and injected into validation; the product
/// rules never reach for global state.
pub trait SkuLookup {
    fn sku_exists(&self, sku: &Sku) -> Result<bool, LookupError>;
}

impl<S> SkuLookup for Arc<S>
where
    S: SkuLookup + ?Sized,
{
    fn sku_exists(&self, sku: &Sku) -> Result<bool, LookupError> {
        (**self).sku_exists(sku)
    }
}

impl<S> SkuLookup for &S
where
    S: SkuLookup + ?Sized,
{
    fn sku_exists(&self, sku: &Sku) -> Result<bool, LookupError> {
        (**self).sku_exists(sku)
    }
}

/// A fixed set of taken SKUs (tests, batch imports).
impl SkuLookup for HashSet<Sku> {
    fn sku_exists(&self, sku: &Sku) -> Result<bool, LookupError> {
        Ok(self.contains(sku))
    }
}
