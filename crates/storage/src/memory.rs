use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::model::{MenuItem, NewOrder, NewUser, Order, User};
use crate::{MenuRepository, OrderRepository, Result, StoreError, UserRepository};

/// In-process credential store.
///
/// All tables sit behind one `RwLock`; every multi-step mutation (email
/// uniqueness check + insert, order lookup + delivered flip) runs under a
/// single write-lock acquisition, which gives those operations the
/// transactional semantics the services rely on.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    menu: BTreeMap<i64, MenuItem>,
    orders: BTreeMap<i64, Order>,
    next_user_id: i64,
    next_menu_id: i64,
    next_order_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.inner.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::EmailTaken);
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            salt: user.salt,
            is_active: true,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.get(&id).cloned())
    }
}

#[async_trait]
impl MenuRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<MenuItem>> {
        let tables = self.inner.read().await;
        Ok(tables.menu.values().cloned().collect())
    }

    async fn find_item(&self, id: i64) -> Result<Option<MenuItem>> {
        let tables = self.inner.read().await;
        Ok(tables.menu.get(&id).cloned())
    }

    async fn insert_item(&self, name: &str, price: Decimal) -> Result<MenuItem> {
        let mut tables = self.inner.write().await;

        tables.next_menu_id += 1;
        let item = MenuItem {
            id: tables.next_menu_id,
            name: name.to_string(),
            price,
        };
        tables.menu.insert(item.id, item.clone());

        Ok(item)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn insert_order(&self, order: NewOrder) -> Result<Order> {
        let mut tables = self.inner.write().await;

        tables.next_order_id += 1;
        let order = Order {
            id: tables.next_order_id,
            user_id: order.user_id,
            customer_phone: order.customer_phone,
            customer_address: order.customer_address,
            total_price: order.total_price,
            delivered: false,
            items: order.items,
            order_date: Utc::now(),
        };
        tables.orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn find_order(&self, id: i64) -> Result<Option<Order>> {
        let tables = self.inner.read().await;
        Ok(tables.orders.get(&id).cloned())
    }

    async fn list_open(&self) -> Result<Vec<Order>> {
        let tables = self.inner.read().await;
        Ok(tables
            .orders
            .values()
            .filter(|o| !o.delivered)
            .cloned()
            .collect())
    }

    async fn orders_by_user(&self, user_id: i64) -> Result<Vec<Order>> {
        let tables = self.inner.read().await;
        Ok(tables
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn mark_delivered(&self, id: i64) -> Result<()> {
        let mut tables = self.inner.write().await;

        match tables.orders.get_mut(&id) {
            Some(order) => {
                order.delivered = true;
                Ok(())
            }
            None => Err(StoreError::NotFound("order")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderItem;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password_hash: "digest".to_string(),
            salt: [0u8; 16],
        }
    }

    fn new_order(user_id: i64) -> NewOrder {
        NewOrder {
            user_id,
            customer_phone: "+36 30 123 4567".to_string(),
            customer_address: "1 Main St".to_string(),
            total_price: Decimal::new(2500, 0),
            items: vec![OrderItem {
                menu_item_id: 1,
                quantity: 2,
            }],
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let store = MemoryStore::new();

        let user = store.insert_user(new_user("a@x.com")).await.unwrap();
        assert_eq!(user.id, 1);
        assert!(user.is_active);

        let by_email = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        let by_id = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();

        store.insert_user(new_user("a@x.com")).await.unwrap();
        let err = store.insert_user(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken));

        // No second row was written.
        let user = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = MemoryStore::new();

        store.insert_user(new_user("a@x.com")).await.unwrap();
        assert!(store.find_by_email("A@X.COM").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_order_starts_undelivered() {
        let store = MemoryStore::new();

        let order = store.insert_order(new_order(1)).await.unwrap();
        assert!(!order.delivered);
        assert_eq!(order.id, 1);

        let open = store.list_open().await.unwrap();
        assert_eq!(open.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_delivered() {
        let store = MemoryStore::new();

        let order = store.insert_order(new_order(1)).await.unwrap();
        store.mark_delivered(order.id).await.unwrap();

        let found = store.find_order(order.id).await.unwrap().unwrap();
        assert!(found.delivered);
        assert!(store.list_open().await.unwrap().is_empty());

        // Marking again is not an error; the flag is monotonic.
        store.mark_delivered(order.id).await.unwrap();

        let err = store.mark_delivered(999).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound("order")));
    }

    #[tokio::test]
    async fn test_orders_by_user() {
        let store = MemoryStore::new();

        store.insert_order(new_order(1)).await.unwrap();
        store.insert_order(new_order(2)).await.unwrap();
        store.insert_order(new_order(1)).await.unwrap();

        let orders = store.orders_by_user(1).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.user_id == 1));
    }

    #[tokio::test]
    async fn test_menu_insert_and_list() {
        let store = MemoryStore::new();

        let pizza = store.insert_item("Margherita", Decimal::new(1000, 0)).await.unwrap();
        store.insert_item("Lemonade", Decimal::new(500, 0)).await.unwrap();

        let menu = store.list().await.unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].id, 1);

        let found = store.find_item(pizza.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Margherita");
        assert!(store.find_item(42).await.unwrap().is_none());
    }
}
