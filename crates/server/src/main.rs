mod seed;

use std::sync::Arc;

use api::{router::router, AppState};
use auth::{AuthService, TokenConfig, TokenService};
use mensa_core::AppConfig;
use orders::OrderService;
use storage::MemoryStore;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::load_with_env().expect("failed to load configuration");

    let store = Arc::new(MemoryStore::new());
    seed::seed_menu(store.as_ref())
        .await
        .expect("failed to seed menu");

    // Signing configuration is injected once here and immutable afterwards.
    let tokens = TokenService::new(TokenConfig {
        secret: config.auth.jwt_secret.clone(),
        issuer: config.auth.issuer.clone(),
        audience: config.auth.audience.clone(),
        token_ttl_seconds: config.auth.token_expiry_seconds,
    });

    let auth_service = AuthService::new(store.clone(), tokens);
    let order_service = OrderService::new(store.clone(), store.clone(), store);

    let state = Arc::new(AppState::new(auth_service, order_service));
    let app = router(state);

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("failed to bind listener");

    info!("Listening on http://{}", address);
    axum::serve(listener, app).await.expect("server error");
}
