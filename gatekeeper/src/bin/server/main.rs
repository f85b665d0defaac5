use std::sync::Arc;

use auth::PasswordHasher;
use gatekeeper::config::Config;
use gatekeeper::domain::user::ports::UserServicePort;
use gatekeeper::domain::user::service::UserService;
use gatekeeper::inbound::http::router::create_router;
use gatekeeper::outbound::repositories::InMemoryUserRepository;
use gatekeeper::outbound::repositories::PostgresUserRepository;
use gatekeeper::outbound::tokens::JwtTokenService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatekeeper=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "gatekeeper",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        port = config.server.port,
        token_expiration_hours = ?config.jwt.expiration_hours,
        memory_kib = config.password.memory_kib,
        iterations = config.password.iterations,
        parallelism = config.password.parallelism,
        max_concurrent_hashes = config.password.max_concurrent,
        storage = if config.database.url.is_some() { "postgresql" } else { "memory" },
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_cost(config.password.cost())?;
    let token_service = Arc::new(JwtTokenService::from_config(&config.jwt));

    let user_service: Arc<dyn UserServicePort> = match &config.database.url {
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

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
            Arc::new(
                UserService::new(user_repository, password_hasher)
                    .with_hashing_limit(config.password.max_concurrent),
            )
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            let user_repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(
                UserService::new(user_repository, password_hasher)
                    .with_hashing_limit(config.password.max_concurrent),
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, token_service.clone(), token_service);

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
