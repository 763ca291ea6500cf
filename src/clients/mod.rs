pub mod auth;
pub mod fcm;

use anyhow::{Error, Result};
use async_trait::async_trait;

use crate::models::{fcm::FcmMessage, health::ServiceHealth};

/// Delivery backend for built notifications.
#[async_trait]
pub trait PushSink: Send + Sync {
    /// Sends one message and returns the backend's message id.
    async fn send(&self, message: &FcmMessage) -> Result<String, Error>;

    async fn health(&self) -> ServiceHealth;
}
