//! Infrastructure layer: product persistence, save pipeline, config.

pub mod config;
pub mod product_store;
pub mod service;


pub use config::{CatalogConfig, ConfigError};
pub use product_store::{InMemoryProductStore, ProductStore, ProductStoreError};
pub use service::{ProductService, SaveError};
