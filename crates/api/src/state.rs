use auth::AuthService;
use orders::OrderService;

/// Application state shared across all handlers
pub struct AppState {
    pub auth_service: AuthService,
    pub order_service: OrderService,
}

impl AppState {
    pub fn new(auth_service: AuthService, order_service: OrderService) -> Self {
        Self {
            auth_service,
            order_service,
        }
    }
}
