use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use roster_stats_api::auth::JwtSessionValidator;
use roster_stats_api::database::{PgPlayerStore, PlayerStore, StaticPlayerStore};
use roster_stats_api::middleware::EdgeGate;
use roster_stats_api::{app, config, is_development, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Roster Stats API in {:?} mode", config.environment);

    if config.auth.secret.is_empty() {
        anyhow::bail!("AUTH_SECRET must be set outside development");
    }
    if is_development!() && std::env::var("AUTH_SECRET").is_err() {
        tracing::warn!("Using the built-in development session secret");
    }

    let players: Arc<dyn PlayerStore> = match &config.roster.fixture_path {
        Some(path) => {
            let store = StaticPlayerStore::from_file(path)
                .with_context(|| format!("failed to load roster fixture {}", path.display()))?;
            tracing::info!("Serving {} roster rows from {}", store.len(), path.display());
            Arc::new(store)
        }
        None => Arc::new(
            PgPlayerStore::connect(&config.database, &config.roster.table)
                .await
                .context("failed to set up roster database")?,
        ),
    };

    let sessions = Arc::new(JwtSessionValidator::from_config(&config.auth));
    let gate = EdgeGate::new(&config.auth.login_path, &config.auth.protected_prefix);
    let state = AppState::new(sessions, players, gate);

    let app = app(state, &config.security);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Roster Stats API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
