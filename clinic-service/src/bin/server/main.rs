use std::sync::Arc;

use auth::Authenticator;
use auth::TokenService;
use chrono::Duration;
use clinic_service::config::Config;
use clinic_service::domain::patient::service::PatientService;
use clinic_service::domain::principal::service::PrincipalService;
use clinic_service::inbound::http::router::create_router;
use clinic_service::outbound::repositories::patient::PostgresPatientRepository;
use clinic_service::outbound::repositories::principal::PostgresPrincipalRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinic_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "clinic-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_days = config.jwt.refresh_ttl_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_service = TokenService::new(config.jwt.secret.as_bytes()).with_ttls(
        Duration::minutes(config.jwt.access_ttl_minutes),
        Duration::days(config.jwt.refresh_ttl_days),
    );
    let authenticator = Arc::new(Authenticator::with_token_service(token_service));

    let principal_repository = Arc::new(PostgresPrincipalRepository::new(pg_pool.clone()));
    let patient_repository = Arc::new(PostgresPatientRepository::new(pg_pool));

    let principal_service = Arc::new(PrincipalService::new(principal_repository, authenticator));
    let patient_service = Arc::new(PatientService::new(patient_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(principal_service, patient_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
