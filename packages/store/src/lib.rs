pub mod catalog;
pub mod config;
pub mod error;
pub mod kv;
pub mod models;
pub mod storefront;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

pub use catalog::{products, ProductQuery, ONBOARDING_SLIDES};
pub use config::StorefrontConfig;
pub use error::StoreError;
pub use kv::{keys, KeyValueStore};
pub use models::{OnboardingSlide, Product};
pub use storefront::{Platform, Storefront, STOREFRONT};
