//! Storefront JSON database library.
//!
//! Provides a typed JSON-file store for the storefront collections (users,
//! products, categories, carts, orders), account auth helpers, and a
//! one-shot merge tool that swaps an exported product payload into the
//! database document.

pub mod auth;
pub mod merge;
pub mod merger;
pub mod models;
pub mod store;
pub mod utils;

pub use merge::{payload_len, replace_products};
pub use merger::{ProductMerger, DEFAULT_PRODUCTS_PATH};
pub use models::Database;
pub use store::{JsonStore, ProductFilters, DEFAULT_DB_PATH};
pub use utils::StoreError;
