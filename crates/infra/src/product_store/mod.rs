//! Product document storage boundary.
//!
//! The store owns the SKU uniqueness index. It doubles as the
//! [`SkuLookup`](catalog_products::SkuLookup) consulted during validation and
//! re-checks uniqueness atomically when a product is inserted.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryProductStore;
pub use r#trait::{ProductStore, ProductStoreError};
