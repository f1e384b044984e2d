//! Typed models for the storefront database document.
//!
//! Field names serialize as camelCase to match the JSON the storefront has
//! always written. Optional fields are omitted when absent so documents stay
//! byte-stable across read/write cycles.

use serde::{Deserialize, Serialize};

/// User account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    /// Argon2 PHC hash, never the plaintext.
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub phone: String,
}

/// A purchasable weight/price variant of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    /// Display weight, e.g. "250g", "500g", "1kg".
    pub weight: String,
    pub price: f64,
    pub stock: u32,
    pub sku: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub category_id: String,
    /// Image URLs relative to the site's public root.
    pub images: Vec<String>,
    pub variants: Vec<ProductVariant>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub display_order: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub variant_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub variant_id: String,
    pub variant_weight: String,
    pub quantity: u32,
    /// Unit price at the time the order was placed.
    pub price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub shipping_address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_signature: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// The full database document. Missing collections deserialize as empty so a
/// partially seeded file still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub carts: Vec<Cart>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            password: "hash".to_string(),
            name: "A".to_string(),
            role: Role::Customer,
            phone: None,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["createdAt"], json!("2024-01-01T00:00:00.000Z"));
        assert_eq!(value["role"], json!("customer"));
        assert!(value.get("phone").is_none());
    }

    #[test]
    fn test_order_status_round_trip() {
        for (status, text) in [
            (OrderStatus::Pending, "pending"),
            (OrderStatus::Confirmed, "confirmed"),
            (OrderStatus::Processing, "processing"),
            (OrderStatus::Shipped, "shipped"),
            (OrderStatus::Delivered, "delivered"),
            (OrderStatus::Cancelled, "cancelled"),
        ] {
            assert_eq!(serde_json::to_value(status).unwrap(), json!(text));
            let back: OrderStatus = serde_json::from_value(json!(text)).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_database_defaults_missing_collections() {
        let db: Database = serde_json::from_value(json!({"products": []})).unwrap();
        assert!(db.users.is_empty());
        assert!(db.orders.is_empty());
    }

    #[test]
    fn test_product_parses_camel_case_document() {
        let value = json!({
            "id": "p1",
            "name": "Almonds",
            "slug": "almonds",
            "description": "Whole almonds",
            "shortDescription": "Almonds",
            "categoryId": "c1",
            "images": ["/images/almonds.jpg"],
            "variants": [
                {"id": "v1", "weight": "250g", "price": 349.0, "stock": 20, "sku": "ALM-250"}
            ],
            "featured": true,
            "nutritionalInfo": {"protein": "21g"},
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z"
        });
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.short_description, "Almonds");
        assert_eq!(product.variants[0].weight, "250g");
        assert_eq!(
            product.nutritional_info.unwrap().protein.as_deref(),
            Some("21g")
        );
        assert!(product.benefits.is_none());
    }
}
