use std::sync::Mutex;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use chrono::FixedOffset;
use reservation_notifier::{
    clients::PushSink,
    config::DEFAULT_IMAGE_URL,
    models::{fcm::FcmMessage, health::ServiceHealth, notification::NotificationSettings},
};

pub fn settings() -> NotificationSettings {
    NotificationSettings {
        topic: "nuevas-reservas".to_string(),
        image_url: Some(DEFAULT_IMAGE_URL.to_string()),
        display_offset: FixedOffset::east_opt(0).unwrap(),
    }
}

/// In-memory sink that records every message it is asked to send.
pub struct RecordingSink {
    pub sent: Mutex<Vec<FcmMessage>>,
    failure: Option<String>,
}

impl RecordingSink {
    pub fn accepting() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(reason.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<FcmMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushSink for RecordingSink {
    async fn send(&self, message: &FcmMessage) -> Result<String, Error> {
        self.sent.lock().unwrap().push(message.clone());

        match &self.failure {
            Some(reason) => Err(anyhow!("{}", reason)),
            None => Ok(format!(
                "projects/demo/messages/{}",
                self.sent.lock().unwrap().len()
            )),
        }
    }

    async fn health(&self) -> ServiceHealth {
        match &self.failure {
            Some(reason) => ServiceHealth::unhealthy(reason.clone()),
            None => ServiceHealth::healthy(1),
        }
    }
}
