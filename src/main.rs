mod config;
mod pages;
mod provider;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    // A missing .env is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let provider = match provider::GoTrueClient::new(&config.auth) {
        Ok(client) => {
            tracing::info!(auth_url = client.base_url(), "auth provider client initialized");
            client
        }
        Err(e) => {
            tracing::error!(error = %e, "auth provider client init failed");
            std::process::exit(1);
        }
    };

    let state = state::AppState::new(Arc::new(provider));
    let app = routes::app(state);

    let port = config.port;
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%port, "gatehouse listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
