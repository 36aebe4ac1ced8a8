use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use storage::{
    MenuItem, MenuRepository, NewOrder, Order, OrderItem, OrderRepository, StoreError,
    UserRepository,
};

use crate::error::{OrderError, Result};
use crate::pricing;

/// Order service: menu listing, order placement, fulfillment.
pub struct OrderService {
    menu: Arc<dyn MenuRepository>,
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
}

/// An open order enriched with the owning user's display name.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub id: i64,
    pub user_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub total_price: Decimal,
    pub delivered: bool,
    pub items: Vec<OrderItem>,
    pub order_date: DateTime<Utc>,
}

impl OrderService {
    pub fn new(
        menu: Arc<dyn MenuRepository>,
        orders: Arc<dyn OrderRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            menu,
            orders,
            users,
        }
    }

    pub async fn list_menu(&self) -> Result<Vec<MenuItem>> {
        Ok(self.menu.list().await?)
    }

    /// All orders not yet delivered, in id order.
    pub async fn list_open_orders(&self) -> Result<Vec<OrderSummary>> {
        let open = self.orders.list_open().await?;

        let mut summaries = Vec::with_capacity(open.len());
        for order in open {
            let customer_name = self
                .users
                .find_by_id(order.user_id)
                .await?
                .map(|u| u.display_name())
                .unwrap_or_default();

            summaries.push(OrderSummary {
                id: order.id,
                user_id: order.user_id,
                customer_name,
                customer_phone: order.customer_phone,
                customer_address: order.customer_address,
                total_price: order.total_price,
                delivered: order.delivered,
                items: order.items,
                order_date: order.order_date,
            });
        }

        Ok(summaries)
    }

    /// Fetch one order; delivered orders stay retrievable.
    pub async fn get_order(&self, id: i64) -> Result<Order> {
        self.orders
            .find_order(id)
            .await?
            .ok_or(OrderError::NotFound)
    }

    /// Place an order for an authenticated user.
    ///
    /// Every requested line must carry a positive quantity and resolve
    /// against the authoritative menu; any unresolved reference rejects the
    /// whole order. The total is computed from server-side menu prices,
    /// never from client input, and the order is persisted undelivered with
    /// the server clock as its timestamp.
    pub async fn place_order(
        &self,
        user_id: i64,
        customer_phone: &str,
        customer_address: &str,
        items: &[OrderItem],
    ) -> Result<Order> {
        if items.is_empty() {
            return Err(OrderError::InvalidRequest(
                "order contains no items".to_string(),
            ));
        }

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            if item.quantity == 0 {
                return Err(OrderError::InvalidRequest(format!(
                    "quantity for menu item {} must be positive",
                    item.menu_item_id
                )));
            }

            let menu_item = self
                .menu
                .find_item(item.menu_item_id)
                .await?
                .ok_or(OrderError::UnknownMenuItem(item.menu_item_id))?;

            lines.push((menu_item, item.quantity));
        }

        let total_price = pricing::compute_total(&lines);

        let order = self
            .orders
            .insert_order(NewOrder {
                user_id,
                customer_phone: customer_phone.to_string(),
                customer_address: customer_address.to_string(),
                total_price,
                items: items.to_vec(),
            })
            .await?;

        info!(order_id = order.id, user_id, %total_price, "order placed");

        Ok(order)
    }

    /// Mark an order delivered. The flag is monotonic; repeating the call on
    /// a delivered order succeeds. An order that vanished between lookup and
    /// update reports [`OrderError::NotFound`] like any other absence.
    pub async fn complete_order(&self, id: i64) -> Result<()> {
        match self.orders.mark_delivered(id).await {
            Ok(()) => {
                info!(order_id = id, "order delivered");
                Ok(())
            }
            Err(StoreError::NotFound(_)) => Err(OrderError::NotFound),
            Err(e) => Err(OrderError::Storage(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::MemoryStore;

    async fn service_with_menu() -> OrderService {
        let store = Arc::new(MemoryStore::new());
        store.insert_item("Margherita", Decimal::new(1000, 0)).await.unwrap();
        store.insert_item("Lemonade", Decimal::new(500, 0)).await.unwrap();

        OrderService::new(store.clone(), store.clone(), store)
    }

    fn line(menu_item_id: i64, quantity: u32) -> OrderItem {
        OrderItem {
            menu_item_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_place_order_prices_from_menu() {
        let service = service_with_menu().await;

        let order = service
            .place_order(1, "+36 30 123 4567", "1 Main St", &[line(1, 2), line(2, 1)])
            .await
            .unwrap();

        assert_eq!(order.total_price, Decimal::new(2500, 0));
        assert!(!order.delivered);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0], line(1, 2));
    }

    #[tokio::test]
    async fn test_empty_order_rejected() {
        let service = service_with_menu().await;

        let err = service
            .place_order(1, "+36 30 123 4567", "1 Main St", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected() {
        let service = service_with_menu().await;

        let err = service
            .place_order(1, "+36 30 123 4567", "1 Main St", &[line(1, 0)])
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_unknown_menu_item_rejects_whole_order() {
        let service = service_with_menu().await;

        let err = service
            .place_order(1, "+36 30 123 4567", "1 Main St", &[line(1, 2), line(42, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::UnknownMenuItem(42)));

        // Nothing was persisted, not even the resolvable lines.
        assert!(service.list_open_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_complete_order_is_idempotent() {
        let service = service_with_menu().await;

        let order = service
            .place_order(1, "+36 30 123 4567", "1 Main St", &[line(1, 1)])
            .await
            .unwrap();

        service.complete_order(order.id).await.unwrap();
        service.complete_order(order.id).await.unwrap();

        let found = service.get_order(order.id).await.unwrap();
        assert!(found.delivered);

        let err = service.complete_order(999).await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound));
    }

    #[tokio::test]
    async fn test_completed_order_leaves_open_list() {
        let service = service_with_menu().await;

        let order = service
            .place_order(1, "+36 30 123 4567", "1 Main St", &[line(1, 1)])
            .await
            .unwrap();
        assert_eq!(service.list_open_orders().await.unwrap().len(), 1);

        service.complete_order(order.id).await.unwrap();
        assert!(service.list_open_orders().await.unwrap().is_empty());

        // Still retrievable directly.
        assert!(service.get_order(order.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_order_absent() {
        let service = service_with_menu().await;

        let err = service.get_order(7).await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound));
    }

    #[tokio::test]
    async fn test_open_orders_carry_customer_name() {
        let store = Arc::new(MemoryStore::new());
        store.insert_item("Margherita", Decimal::new(1000, 0)).await.unwrap();

        let user = store
            .insert_user(storage::NewUser {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "a@x.com".to_string(),
                password_hash: "digest".to_string(),
                salt: [0u8; 16],
            })
            .await
            .unwrap();

        let service = OrderService::new(store.clone(), store.clone(), store);
        service
            .place_order(user.id, "+36 30 123 4567", "1 Main St", &[line(1, 1)])
            .await
            .unwrap();

        let open = service.list_open_orders().await.unwrap();
        assert_eq!(open[0].customer_name, "Ada Lovelace");
    }

    // Register, login, order, fulfill: the whole flow against one store.
    #[tokio::test]
    async fn test_full_ordering_flow() {
        use auth::{AuthService, TokenConfig, TokenService};

        let store = Arc::new(MemoryStore::new());
        store.insert_item("Margherita", Decimal::new(1000, 0)).await.unwrap();
        store.insert_item("Lemonade", Decimal::new(500, 0)).await.unwrap();

        let auth = AuthService::new(
            store.clone(),
            TokenService::new(TokenConfig {
                secret: "test_secret".to_string(),
                issuer: "mensa".to_string(),
                audience: "mensa-client".to_string(),
                token_ttl_seconds: 86400,
            }),
        );
        let orders = OrderService::new(store.clone(), store.clone(), store);

        let user = auth.register("Ada", "Lovelace", "a@x.com", "pw1").await.unwrap();

        let token = auth.login("a@x.com", "pw1").await.unwrap();
        let claims = auth.validate(&token).unwrap();
        assert_eq!(claims.subject_id().unwrap(), user.id);

        assert!(matches!(
            auth.login("a@x.com", "wrong").await.unwrap_err(),
            auth::AuthError::InvalidCredentials
        ));

        let order = orders
            .place_order(
                claims.subject_id().unwrap(),
                "+36 30 123 4567",
                "1 Main St",
                &[line(1, 2), line(2, 1)],
            )
            .await
            .unwrap();
        assert_eq!(order.total_price, Decimal::new(2500, 0));
        assert!(!order.delivered);

        orders.complete_order(order.id).await.unwrap();

        let fetched = orders.get_order(order.id).await.unwrap();
        assert!(fetched.delivered);
        assert!(orders.list_open_orders().await.unwrap().is_empty());
    }
}
