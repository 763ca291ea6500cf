use anyhow::{Error, Result, anyhow};
use chrono::FixedOffset;
use dotenvy::dotenv;
use serde::Deserialize;

use crate::models::{notification::NotificationSettings, validation::validate_topic_name};

pub const DEFAULT_IMAGE_URL: &str =
    "https://res.cloudinary.com/dtjscibjc/image/upload/v1753754305/ysfcjrmtahtsanfxonn7.jpg";

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub fcm_project_id: String,
    #[serde(default = "default_fcm_base_url")]
    pub fcm_base_url: String,
    #[serde(default)]
    pub fcm_validate_only: bool,
    #[serde(default)]
    pub fcm_access_token: Option<String>,

    #[serde(default = "default_notification_topic")]
    pub notification_topic: String,
    #[serde(default = "default_notification_image_url")]
    pub notification_image_url: String,
    #[serde(default)]
    pub display_utc_offset_minutes: i32,

    #[serde(default = "default_reservations_collection")]
    pub reservations_collection: String,

    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

fn default_fcm_base_url() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_notification_topic() -> String {
    "nuevas-reservas".to_string()
}

fn default_notification_image_url() -> String {
    DEFAULT_IMAGE_URL.to_string()
}

fn default_reservations_collection() -> String {
    "reservas".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Builds the configuration from `(NAME, value)` pairs and validates it.
    pub fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Self>(vars)
            .map_err(|e| anyhow!("Invalid or missing environmental variable: {}", e))?;

        validate_topic_name(&config.notification_topic)?;
        config.display_offset()?;

        if config.reservations_collection.is_empty() || config.reservations_collection.contains('/')
        {
            return Err(anyhow!(
                "Reservations collection must be a single top-level collection id"
            ));
        }

        Ok(config)
    }

    pub fn display_offset(&self) -> Result<FixedOffset, Error> {
        self.display_utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow!(
                    "Display UTC offset out of range: {} minutes",
                    self.display_utc_offset_minutes
                )
            })
    }

    pub fn notification_settings(&self) -> Result<NotificationSettings, Error> {
        let image_url = Some(self.notification_image_url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(NotificationSettings {
            topic: self.notification_topic.clone(),
            image_url,
            display_offset: self.display_offset()?,
        })
    }
}
