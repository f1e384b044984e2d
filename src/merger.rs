//! One-shot merge of an exported product payload into the database document.
//!
//! This is the admin-side import step: product data exported elsewhere is
//! dropped at a well-known path and swapped into the live document wholesale.
//! Reads happen before the write, so a missing or malformed input leaves the
//! document untouched. The write itself truncates in place; there is no
//! backup or atomic rename.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::merge::{payload_len, replace_products};
use crate::store::DEFAULT_DB_PATH;
use crate::utils::StoreError;

/// Where exported product payloads are dropped for import.
pub const DEFAULT_PRODUCTS_PATH: &str = "/tmp/products.json";

/// Merges a products payload into the database document on disk.
///
/// Both paths default to the storefront's fixed locations and can be
/// redirected for tests or embedding.
pub struct ProductMerger {
    db_path: PathBuf,
    products_path: PathBuf,
}

impl ProductMerger {
    /// Create a merger targeting the default storefront paths.
    pub fn new() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            products_path: PathBuf::from(DEFAULT_PRODUCTS_PATH),
        }
    }

    /// Redirect the database document path.
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Redirect the products payload path.
    pub fn with_products_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.products_path = path.into();
        self
    }

    /// Run the merge and return the number of products in the payload.
    ///
    /// Steps: read and parse both files, replace the document's `products`
    /// key, write the document back with 2-space indentation.
    pub fn run(&self) -> Result<usize, StoreError> {
        let document = read_json(&self.db_path)?;
        let payload = read_json(&self.products_path)?;

        let merged = replace_products(&document, &payload)?;

        let serialized = serde_json::to_string_pretty(&merged)?;
        fs::write(&self.db_path, serialized).map_err(|e| StoreError::write(&self.db_path, e))?;

        Ok(payload_len(&payload))
    }
}

impl Default for ProductMerger {
    fn default() -> Self {
        Self::new()
    }
}

fn read_json(path: &Path) -> Result<Value, StoreError> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::read(path, e))?;
    serde_json::from_str(&content).map_err(|e| StoreError::parse(path, e))
}
