use std::sync::Arc;

use auth::Authenticator;
use auth::TokenCodec;
use auth_service::config::Config;
use auth_service::domain::identity::ports::CredentialStore;
use auth_service::domain::identity::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryCredentialStore;
use auth_service::outbound::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
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
        jwt_expiration_hours = config.jwt.expiration_hours,
        allowed_origins = ?config.server.allowed_origins,
        persistent_store = config.database.url.is_some(),
        "Configuration loaded"
    );

    let token_codec =
        TokenCodec::from_hours(config.jwt.secret.as_bytes(), config.jwt.expiration_hours)?;
    let authenticator = Arc::new(Authenticator::new(token_codec)?);

    match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let store = Arc::new(PostgresCredentialStore::new(pg_pool));
            serve(&config, store, authenticator).await
        }
        None => {
            tracing::warn!("No database configured, identities are kept in memory");

            let store = Arc::new(InMemoryCredentialStore::new());
            serve(&config, store, authenticator).await
        }
    }
}

async fn serve<CS: CredentialStore>(
    config: &Config,
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
) -> Result<(), anyhow::Error> {
    let auth_service = Arc::new(AuthService::new(store, authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, &config.server.allowed_origins);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
