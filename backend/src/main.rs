use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taproom::cli::CliOptions;
use taproom::config::Config;
use taproom::db::Database;
use taproom::{AppState, build_app, graphql};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliOptions::from_args()?;
    if cli.print_schema {
        println!("{}", graphql::schema_sdl());
        return Ok(());
    }

    dotenvy::dotenv().ok();
    let mut config = Config::from_env()?;
    if let Some(port) = cli.port_override {
        config.port = port;
    }
    let config = Arc::new(config);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taproom=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Taproom backend");
    if config.jwt_secret_generated {
        tracing::warn!("JWT_SECRET not set; using a generated secret, no issued token will verify");
    }

    let db = Database::connect_with_retry(
        &config.database_url,
        config.database_max_connections,
        Duration::from_secs(5),
    )
    .await;
    tracing::info!("Database connected");

    let sync = db.sync_schema().await;
    if !sync.tables_created.is_empty() || !sync.columns_added.is_empty() {
        tracing::info!(
            tables_created = ?sync.tables_created,
            columns_added = ?sync.columns_added,
            "Schema synchronized"
        );
    }
    for error in &sync.errors {
        tracing::warn!(error = %error, "Schema sync problem");
    }

    let state = AppState::new(config.clone(), db);
    tracing::info!("GraphQL schema built");
    let app = build_app(state);

    let ip = config
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid HOST: {}", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
