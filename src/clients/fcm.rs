use std::{sync::Arc, time::Instant};

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::{
    clients::{PushSink, auth::AccessTokenSource},
    config::Config,
    models::{
        fcm::{FcmErrorResponse, FcmMessage, FcmRequest, FcmResponse},
        health::ServiceHealth,
    },
};

pub struct FcmClient {
    http_client: Client,
    send_url: String,
    validate_only: bool,
    token_source: Arc<dyn AccessTokenSource>,
}

impl FcmClient {
    pub fn new(config: &Config, token_source: Arc<dyn AccessTokenSource>) -> Self {
        let send_url = format!(
            "{}/v1/projects/{}/messages:send",
            config.fcm_base_url.trim_end_matches('/'),
            config.fcm_project_id
        );

        info!(
            project_id = %config.fcm_project_id,
            validate_only = config.fcm_validate_only,
            "FCM client initialized"
        );

        Self {
            http_client: Client::new(),
            send_url,
            validate_only: config.fcm_validate_only,
            token_source,
        }
    }
}

#[async_trait]
impl PushSink for FcmClient {
    async fn send(&self, message: &FcmMessage) -> Result<String, Error> {
        debug!(topic = %message.topic, "Sending FCM push notification");

        let token = self.token_source.access_token().await?;

        let request = FcmRequest {
            validate_only: self.validate_only,
            message: message.clone(),
        };

        let response = self
            .http_client
            .post(&self.send_url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let body = response.json::<FcmResponse>().await?;
            info!(message_id = %body.name, "FCM push notification accepted");
            Ok(body.name)
        } else {
            let error_text = response.text().await?;

            match serde_json::from_str::<FcmErrorResponse>(&error_text) {
                Ok(error) => Err(anyhow!(
                    "FCM request failed ({} {}): {}",
                    error.error.code,
                    error.error.status.unwrap_or_default(),
                    error.error.message
                )),
                Err(_) => Err(anyhow!("FCM request failed ({}): {}", status, error_text)),
            }
        }
    }

    async fn health(&self) -> ServiceHealth {
        let start = Instant::now();

        match self.token_source.access_token().await {
            Ok(_) => ServiceHealth::healthy(start.elapsed().as_millis() as u64),
            Err(e) => ServiceHealth::unhealthy(format!("Access token unavailable: {}", e)),
        }
    }
}
