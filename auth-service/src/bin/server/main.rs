use std::sync::Arc;

use auth_core::TokenCodec;
use auth_core::TokenIssuer;
use auth_service::config::Config;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryPrincipalRepository;
use chrono::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_ttl_ms = config.jwt.expiration_ms,
        refresh_ttl_ms = config.jwt.refresh_expiration_ms,
        "Configuration loaded"
    );

    // Signing key material is read once here and shared read-only.
    let codec = Arc::new(TokenCodec::new(config.jwt.secret.as_bytes()));
    let issuer = TokenIssuer::new(
        Arc::clone(&codec),
        Duration::milliseconds(config.jwt.expiration_ms),
        Duration::milliseconds(config.jwt.refresh_expiration_ms),
    );

    let principal_repository = Arc::new(InMemoryPrincipalRepository::new());
    let auth_service = Arc::new(AuthService::new(principal_repository, codec, issuer));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
