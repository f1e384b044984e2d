//! Typed JSON-file store over the database document.
//!
//! Every operation is read-modify-write against the full document. A read
//! that fails (missing file, bad JSON) falls back to an empty database and
//! logs the error, so a fresh deployment starts from nothing instead of
//! crashing. Writes within one process are serialized by an in-memory lock;
//! there is no cross-process protection.

use std::cmp::Reverse;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::DateTime;

use crate::models::{
    Address, Cart, CartItem, Category, Database, NutritionalInfo, Order, OrderItem, OrderStatus,
    Product, ProductVariant, Role, User,
};
use crate::utils::{generate_id, generate_order_number, now_iso, StoreError};

/// Where the storefront keeps its database document.
pub const DEFAULT_DB_PATH: &str = "src/lib/db.json";

/// Input for [`JsonStore::create_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    /// Already hashed; see [`crate::auth::hash_password`].
    pub password: String,
    pub name: String,
    pub role: Role,
    pub phone: Option<String>,
}

/// Input for [`JsonStore::create_product`].
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub category_id: String,
    pub images: Vec<String>,
    pub variants: Vec<ProductVariant>,
    pub featured: bool,
    pub nutritional_info: Option<NutritionalInfo>,
    pub benefits: Option<Vec<String>>,
}

/// Partial update for a product. `None` fields are left unchanged; the id and
/// creation timestamp are immutable.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub category_id: Option<String>,
    pub images: Option<Vec<String>>,
    pub variants: Option<Vec<ProductVariant>>,
    pub featured: Option<bool>,
    pub nutritional_info: Option<NutritionalInfo>,
    pub benefits: Option<Vec<String>>,
}

/// Input for [`JsonStore::create_category`].
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub display_order: i64,
}

/// Partial update for a category.
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub display_order: Option<i64>,
}

/// Input for [`JsonStore::create_order`].
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub shipping_address: Address,
    pub payment_id: Option<String>,
    pub razorpay_order_id: Option<String>,
}

/// Partial update for an order (status transitions and payment capture).
#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub payment_id: Option<String>,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

/// Product listing filters. Search matches name or description,
/// case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub category_id: Option<String>,
    pub search: Option<String>,
}

/// The JSON-file store.
pub struct JsonStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Open a store over the given document path. The file is not touched
    /// until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the full database, falling back to an empty one on any error.
    pub fn read(&self) -> Database {
        match self.try_read() {
            Ok(db) => db,
            Err(err) => {
                eprintln!("{}", err);
                Database::default()
            }
        }
    }

    /// Read the full database, propagating read/parse errors.
    pub fn try_read(&self) -> Result<Database, StoreError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| StoreError::read(&self.path, e))?;
        serde_json::from_str(&content).map_err(|e| StoreError::parse(&self.path, e))
    }

    fn write(&self, db: &Database) -> Result<(), StoreError> {
        let serialized = serde_json::to_string_pretty(db)?;
        fs::write(&self.path, serialized).map_err(|e| StoreError::write(&self.path, e))
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // A poisoned lock only means another writer panicked mid-operation;
        // the document on disk is still the source of truth.
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ---- users ----

    pub fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        let user = User {
            id: generate_id(),
            email: new.email,
            password: new.password,
            name: new.name,
            role: new.role,
            phone: new.phone,
            created_at: now_iso(),
        };
        db.users.push(user.clone());
        self.write(&db)?;
        Ok(user)
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        let needle = email.to_lowercase();
        self.read()
            .users
            .into_iter()
            .find(|u| u.email.to_lowercase() == needle)
    }

    pub fn user_by_id(&self, id: &str) -> Option<User> {
        self.read().users.into_iter().find(|u| u.id == id)
    }

    // ---- products ----

    pub fn products(&self, filters: &ProductFilters) -> Vec<Product> {
        let mut products = self.read().products;

        if let Some(category_id) = &filters.category_id {
            products.retain(|p| &p.category_id == category_id);
        }

        if let Some(search) = &filters.search {
            let needle = search.to_lowercase();
            products.retain(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            });
        }

        products
    }

    pub fn product_by_id(&self, id: &str) -> Option<Product> {
        self.read().products.into_iter().find(|p| p.id == id)
    }

    pub fn product_by_slug(&self, slug: &str) -> Option<Product> {
        self.read().products.into_iter().find(|p| p.slug == slug)
    }

    pub fn create_product(&self, new: NewProduct) -> Result<Product, StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        let now = now_iso();
        let product = Product {
            id: generate_id(),
            name: new.name,
            slug: new.slug,
            description: new.description,
            short_description: new.short_description,
            category_id: new.category_id,
            images: new.images,
            variants: new.variants,
            featured: new.featured,
            nutritional_info: new.nutritional_info,
            benefits: new.benefits,
            created_at: now.clone(),
            updated_at: now,
        };
        db.products.push(product.clone());
        self.write(&db)?;
        Ok(product)
    }

    pub fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Option<Product>, StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        let product = match db.products.iter_mut().find(|p| p.id == id) {
            Some(p) => p,
            None => return Ok(None),
        };

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(slug) = update.slug {
            product.slug = slug;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(short_description) = update.short_description {
            product.short_description = short_description;
        }
        if let Some(category_id) = update.category_id {
            product.category_id = category_id;
        }
        if let Some(images) = update.images {
            product.images = images;
        }
        if let Some(variants) = update.variants {
            product.variants = variants;
        }
        if let Some(featured) = update.featured {
            product.featured = featured;
        }
        if let Some(nutritional_info) = update.nutritional_info {
            product.nutritional_info = Some(nutritional_info);
        }
        if let Some(benefits) = update.benefits {
            product.benefits = Some(benefits);
        }
        product.updated_at = now_iso();

        let updated = product.clone();
        self.write(&db)?;
        Ok(Some(updated))
    }

    pub fn delete_product(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        let index = match db.products.iter().position(|p| p.id == id) {
            Some(i) => i,
            None => return Ok(false),
        };
        db.products.remove(index);
        self.write(&db)?;
        Ok(true)
    }

    // ---- categories ----

    /// Categories in display order.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = self.read().categories;
        categories.sort_by_key(|c| c.display_order);
        categories
    }

    pub fn category_by_id(&self, id: &str) -> Option<Category> {
        self.read().categories.into_iter().find(|c| c.id == id)
    }

    pub fn create_category(&self, new: NewCategory) -> Result<Category, StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        let category = Category {
            id: generate_id(),
            name: new.name,
            slug: new.slug,
            description: new.description,
            image: new.image,
            display_order: new.display_order,
            created_at: now_iso(),
        };
        db.categories.push(category.clone());
        self.write(&db)?;
        Ok(category)
    }

    pub fn update_category(
        &self,
        id: &str,
        update: CategoryUpdate,
    ) -> Result<Option<Category>, StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        let category = match db.categories.iter_mut().find(|c| c.id == id) {
            Some(c) => c,
            None => return Ok(None),
        };

        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(slug) = update.slug {
            category.slug = slug;
        }
        if let Some(description) = update.description {
            category.description = description;
        }
        if let Some(image) = update.image {
            category.image = image;
        }
        if let Some(display_order) = update.display_order {
            category.display_order = display_order;
        }

        let updated = category.clone();
        self.write(&db)?;
        Ok(Some(updated))
    }

    pub fn delete_category(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        let index = match db.categories.iter().position(|c| c.id == id) {
            Some(i) => i,
            None => return Ok(false),
        };
        db.categories.remove(index);
        self.write(&db)?;
        Ok(true)
    }

    // ---- carts ----

    pub fn cart(&self, user_id: &str) -> Option<Cart> {
        self.read().carts.into_iter().find(|c| c.user_id == user_id)
    }

    /// Replace the user's cart items, creating the cart if needed. The cart
    /// id is stable across upserts.
    pub fn update_cart(&self, user_id: &str, items: Vec<CartItem>) -> Result<Cart, StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        let existing = db.carts.iter().position(|c| c.user_id == user_id);

        let cart = Cart {
            id: match existing {
                Some(i) => db.carts[i].id.clone(),
                None => generate_id(),
            },
            user_id: user_id.to_string(),
            items,
            updated_at: now_iso(),
        };

        match existing {
            Some(i) => db.carts[i] = cart.clone(),
            None => db.carts.push(cart.clone()),
        }

        self.write(&db)?;
        Ok(cart)
    }

    pub fn clear_cart(&self, user_id: &str) -> Result<(), StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        if let Some(index) = db.carts.iter().position(|c| c.user_id == user_id) {
            db.carts.remove(index);
            self.write(&db)?;
        }
        Ok(())
    }

    // ---- orders ----

    /// Orders newest-first, optionally restricted to one user.
    pub fn orders(&self, user_id: Option<&str>) -> Vec<Order> {
        let mut orders = self.read().orders;
        if let Some(user_id) = user_id {
            orders.retain(|o| o.user_id == user_id);
        }
        orders.sort_by_key(|o| Reverse(timestamp_millis(&o.created_at)));
        orders
    }

    pub fn order_by_id(&self, id: &str) -> Option<Order> {
        self.read().orders.into_iter().find(|o| o.id == id)
    }

    pub fn order_by_number(&self, order_number: &str) -> Option<Order> {
        self.read()
            .orders
            .into_iter()
            .find(|o| o.order_number == order_number)
    }

    pub fn create_order(&self, new: NewOrder) -> Result<Order, StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        let now = now_iso();
        let order = Order {
            id: generate_id(),
            order_number: generate_order_number(),
            user_id: new.user_id,
            items: new.items,
            subtotal: new.subtotal,
            shipping: new.shipping,
            tax: new.tax,
            total: new.total,
            status: new.status,
            shipping_address: new.shipping_address,
            payment_id: new.payment_id,
            razorpay_order_id: new.razorpay_order_id,
            razorpay_payment_id: None,
            razorpay_signature: None,
            created_at: now.clone(),
            updated_at: now,
        };
        db.orders.push(order.clone());
        self.write(&db)?;
        Ok(order)
    }

    pub fn update_order(
        &self,
        id: &str,
        update: OrderUpdate,
    ) -> Result<Option<Order>, StoreError> {
        let _guard = self.lock();
        let mut db = self.read();
        let order = match db.orders.iter_mut().find(|o| o.id == id) {
            Some(o) => o,
            None => return Ok(None),
        };

        if let Some(status) = update.status {
            order.status = status;
        }
        if let Some(payment_id) = update.payment_id {
            order.payment_id = Some(payment_id);
        }
        if let Some(razorpay_order_id) = update.razorpay_order_id {
            order.razorpay_order_id = Some(razorpay_order_id);
        }
        if let Some(razorpay_payment_id) = update.razorpay_payment_id {
            order.razorpay_payment_id = Some(razorpay_payment_id);
        }
        if let Some(razorpay_signature) = update.razorpay_signature {
            order.razorpay_signature = Some(razorpay_signature);
        }
        order.updated_at = now_iso();

        let updated = order.clone();
        self.write(&db)?;
        Ok(Some(updated))
    }
}

impl Default for JsonStore {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

/// RFC3339 timestamp as millis; unparseable values sort oldest.
fn timestamp_millis(ts: &str) -> i64 {
    DateTime::parse_from_rfc3339(ts)
        .map(|t| t.timestamp_millis())
        .unwrap_or(0)
}
