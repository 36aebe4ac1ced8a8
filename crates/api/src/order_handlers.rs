use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use orders::OrderError;
use storage::OrderItem;

use crate::middleware::AuthUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer_phone: String,
    pub customer_address: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /orders - all orders not yet delivered
pub async fn list_orders(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.order_service.list_open_orders().await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => {
            let error = ErrorResponse {
                error: format!("Failed to list orders: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.order_service.get_order(id).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(OrderError::NotFound) => {
            let error = ErrorResponse {
                error: "Order not found".to_string(),
            };
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
        Err(e) => {
            let error = ErrorResponse {
                error: format!("Failed to fetch order: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// GET /menuitems
pub async fn list_menu_items(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.order_service.list_menu().await {
        Ok(menu) => (StatusCode::OK, Json(menu)).into_response(),
        Err(e) => {
            let error = ErrorResponse {
                error: format!("Failed to list menu: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// POST /order - place an order for the authenticated user
pub async fn place_order(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<PlaceOrderRequest>,
) -> impl IntoResponse {
    match state
        .order_service
        .place_order(
            user_id,
            &payload.customer_phone,
            &payload.customer_address,
            &payload.items,
        )
        .await
    {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e @ (OrderError::InvalidRequest(_) | OrderError::UnknownMenuItem(_))) => {
            let error = ErrorResponse {
                error: e.to_string(),
            };
            (StatusCode::BAD_REQUEST, Json(error)).into_response()
        }
        Err(e) => {
            let error = ErrorResponse {
                error: format!("Failed to place order: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// PUT /orders/{id}/complete - mark an order delivered
pub async fn complete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.order_service.complete_order(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(OrderError::NotFound) => {
            let error = ErrorResponse {
                error: "Order not found".to_string(),
            };
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
        Err(e) => {
            let error = ErrorResponse {
                error: format!("Failed to complete order: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}
