use chrono::FixedOffset;

/// Deployment-level inputs of the notification builder.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationSettings {
    pub topic: String,
    pub image_url: Option<String>,
    pub display_offset: FixedOffset,
}
