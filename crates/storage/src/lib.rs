//! Credential store: users, menu items, and orders behind repository traits.
//!
//! The rest of the workspace only ever sees the traits in this module, so the
//! in-memory store can be swapped for a relational backend without touching
//! the auth or order services.

pub mod memory;
pub mod model;

pub use memory::MemoryStore;
pub use model::{MenuItem, NewOrder, NewUser, Order, OrderItem, Salt, User, SALT_LEN};

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email address is already in use")]
    EmailTaken,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// User records: lookup by email or id, insert with email uniqueness.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. The uniqueness check and the insert happen under a
    /// single store transaction; a duplicate email yields
    /// [`StoreError::EmailTaken`] and writes nothing.
    async fn insert_user(&self, user: NewUser) -> Result<User>;

    /// Exact-match lookup, case-sensitive as stored.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
}

/// The authoritative menu.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<MenuItem>>;

    async fn find_item(&self, id: i64) -> Result<Option<MenuItem>>;

    /// Insert a menu item. Used by startup seeding and tests; the order flow
    /// never writes the menu.
    async fn insert_item(&self, name: &str, price: Decimal) -> Result<MenuItem>;
}

/// Orders and their delivery state.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order with `delivered = false` and the store's clock as
    /// the order timestamp.
    async fn insert_order(&self, order: NewOrder) -> Result<Order>;

    async fn find_order(&self, id: i64) -> Result<Option<Order>>;

    /// Orders not yet delivered, in id order.
    async fn list_open(&self) -> Result<Vec<Order>>;

    async fn orders_by_user(&self, user_id: i64) -> Result<Vec<Order>>;

    /// Flip `delivered` to true. The lookup and the update happen under one
    /// store transaction; an absent order (including one that vanished
    /// between a caller's lookup and this call) yields
    /// [`StoreError::NotFound`].
    async fn mark_delivered(&self, id: i64) -> Result<()>;
}
