//! Product catalog replacement for a JSON database document.

use serde_json::Value;

use crate::utils::StoreError;

/// Key of the database document that holds the product catalog.
pub const PRODUCTS_KEY: &str = "products";

/// Replace the document's `products` key with the payload, leaving every
/// other key untouched. The payload is assigned verbatim, whatever its shape.
///
/// Fails if the document is not a JSON object, since key assignment has no
/// meaning on arrays or scalars.
pub fn replace_products(document: &Value, payload: &Value) -> Result<Value, StoreError> {
    let mut map = match document {
        Value::Object(map) => map.clone(),
        _ => {
            return Err(StoreError::Document(
                "database document is not a JSON object".to_string(),
            ))
        }
    };
    map.insert(PRODUCTS_KEY.to_string(), payload.clone());
    Ok(Value::Object(map))
}

/// Number of entries in a payload: array length, object key count, 0 for
/// scalars.
pub fn payload_len(payload: &Value) -> usize {
    match payload {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => 0,
    }
}
