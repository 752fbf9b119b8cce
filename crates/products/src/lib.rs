//! Products domain module.
//!
//! This crate contains the rules a product record must satisfy before it is
//! stored, implemented purely as deterministic domain logic (no IO, no
//! storage). The one rule that needs outside knowledge, SKU uniqueness, is
//! answered through the injected [`SkuLookup`] capability.

pub mod lookup;
pub mod product;
pub mod values;
pub mod violation;

pub use lookup::{LookupError, SkuLookup};
pub use product::{FieldInput, Product, ProductDraft, ProductId};
pub use values::{Category, Price, ProductName, Sku, Stock, Tag, Tags};
pub use violation::{Field, FieldReport, ValidationErrors, Violation};
