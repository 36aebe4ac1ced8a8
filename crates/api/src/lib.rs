pub mod auth_handlers;
pub mod middleware;
pub mod order_handlers;
pub mod router;
pub mod state;

pub use state::AppState;
