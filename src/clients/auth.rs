use std::sync::Arc;

use anyhow::{Error, Result};
use async_trait::async_trait;
use gcp_auth::TokenProvider;
use tracing::info;

use crate::config::Config;

pub const FCM_SCOPES: &[&str] = &["https://www.googleapis.com/auth/firebase.messaging"];

#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, Error>;
}

/// Tokens from Google application default credentials.
pub struct GcpTokenSource {
    provider: Arc<dyn TokenProvider>,
}

impl GcpTokenSource {
    pub async fn discover() -> Result<Self, Error> {
        let provider = gcp_auth::provider().await?;

        info!("Google application default credentials discovered");

        Ok(Self { provider })
    }
}

#[async_trait]
impl AccessTokenSource for GcpTokenSource {
    async fn access_token(&self) -> Result<String, Error> {
        let token = self.provider.token(FCM_SCOPES).await?;
        Ok(token.as_str().to_string())
    }
}

pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self) -> Result<String, Error> {
        Ok(self.token.clone())
    }
}

pub async fn token_source(config: &Config) -> Result<Arc<dyn AccessTokenSource>, Error> {
    match config.fcm_access_token.as_deref() {
        Some(token) if !token.is_empty() => {
            info!("Using static FCM access token");
            Ok(Arc::new(StaticTokenSource::new(token)))
        }
        _ => Ok(Arc::new(GcpTokenSource::discover().await?)),
    }
}
