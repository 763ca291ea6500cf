use std::sync::Arc;

use anyhow::{Error, Result};
use reservation_notifier::{
    api::run_api_server,
    clients::{auth::token_source, fcm::FcmClient},
    config::Config,
    dispatcher::Dispatcher,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = Config::load()?;

    let fcm_client = FcmClient::new(&config, token_source(&config).await?);
    let dispatcher = Dispatcher::new(Arc::new(fcm_client), config.notification_settings()?);

    run_api_server(&config, dispatcher).await
}
