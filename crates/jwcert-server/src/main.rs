//! HTTP endpoint for verifying certificate tokens
//!
//! Run with
//!
//! ```not_rust
//! JWT_PUBLIC_KEY="$(cat public.pem)" cargo run -p jwcert-server
//! ```

mod config;
mod routes;

use config::{PUBLIC_KEY_VAR, ServerConfig};
use jwcert::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwcert=info,jwcert_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let verifier = config.verifier();

    match verifier.parse_default_key() {
        Ok(key) => tracing::info!(modulus_bits = key.modulus_bits(), "default public key loaded"),
        Err(Error::KeyMissing) => tracing::warn!(
            "{PUBLIC_KEY_VAR} is not set, requests without a public key will fail"
        ),
        Err(error) => tracing::warn!(
            %error,
            "{PUBLIC_KEY_VAR} is not a usable RSA public key, verification will fail"
        ),
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, routes::router(verifier))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
