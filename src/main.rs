use dotenvy::dotenv;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use roster::database::{self, schema};
use roster::settings::Settings;
use roster::web;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env();
    info!(build_id = env!("ROSTER_BUILD_ID"), "starting roster");

    // 2. Database
    info!(database_url = %settings.database_url, "connecting to database");
    let pool = database::connect(&settings.database_url)
        .await
        .expect("cannot connect to database");
    schema::ensure_schema(&pool)
        .await
        .expect("cannot create schema");
    schema::seed_default_catalog(&pool)
        .await
        .expect("cannot seed activity catalog");

    // 3. Routes
    if let Some(api_url) = &settings.api_url {
        info!(%api_url, "board page uses remote activities API");
    }
    let state = web::AppState::from_settings(pool, &settings).expect("invalid ROSTER_API_URL");
    let app = web::app(state);

    // 4. Serve, falling back to the next port when the configured one is taken
    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .expect("cannot parse host/port");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback: SocketAddr = format!("{}:{}", settings.host, settings.port.saturating_add(1))
                .parse()
                .expect("cannot parse fallback host/port");
            warn!(%addr, %fallback, error = %e, "bind failed, trying fallback port");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("cannot bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().expect("listener has no local address");
    info!("roster board running on http://{}", bound_addr);

    axum::serve(listener, app).await.expect("server error");
}
