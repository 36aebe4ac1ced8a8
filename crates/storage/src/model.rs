use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Length of the per-user password salt, in bytes.
pub const SALT_LEN: usize = 16;

/// Random per-user value mixed into password hashing.
pub type Salt = [u8; SALT_LEN];

/// A registered user. The password digest and salt never leave the store
/// except through the auth service; API views expose the other fields only.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Base64-encoded salted digest, opaque to everything but password
    /// verification.
    pub password_hash: String,
    pub salt: Salt,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// "First Last", as shown on order summaries.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a user; the store assigns id and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub salt: Salt,
}

/// A menu entry. Read-only reference data from the order flow's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

/// One line of an order: a menu reference plus a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item_id: i64,
    pub quantity: u32,
}

/// A placed order. `delivered` starts false and flips true exactly once;
/// `total_price` is computed server-side from menu prices at placement.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub customer_phone: String,
    pub customer_address: String,
    pub total_price: Decimal,
    pub delivered: bool,
    pub items: Vec<OrderItem>,
    pub order_date: DateTime<Utc>,
}

/// Input for creating an order; the store assigns id, order timestamp, and
/// the initial `delivered = false` state.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub customer_phone: String,
    pub customer_address: String,
    pub total_price: Decimal,
    pub items: Vec<OrderItem>,
}
