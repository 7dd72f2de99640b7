use std::sync::Arc;

use auth::Authenticator;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vault_service::config::Config;
use vault_service::domain::storage::service::StorageService;
use vault_service::domain::user::service::AuthService;
use vault_service::inbound::http::router::create_router;
use vault_service::outbound::repositories::JsonFileUserRepository;
use vault_service::outbound::storage::TokioFileStore;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vault_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "vault-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_path = %config.database.path,
        storage_root = %config.storage.root,
        uploads_dir = %config.storage.uploads_dir,
        http_port = config.server.http_port,
        token_expiration_hours = ?config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let user_repository = Arc::new(
        JsonFileUserRepository::load(&config.database.path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to load user store: {}", e))?,
    );
    tracing::info!(path = %config.database.path, "User store loaded");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let storage = Arc::new(StorageService::new(
        Arc::new(TokioFileStore::new()),
        config.storage.root.clone(),
        &config.storage.uploads_dir,
    ));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&storage),
        Arc::clone(&authenticator),
        config.jwt.expiration_hours,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, authenticator, storage);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
