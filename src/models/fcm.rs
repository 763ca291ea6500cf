use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body of an FCM HTTP v1 `messages:send` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcmRequest {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub validate_only: bool,
    pub message: FcmMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcmMessage {
    pub topic: String,
    pub notification: FcmNotification,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
    pub webpush: WebpushConfig,
    /// FCM rejects non-string values here.
    pub data: HashMap<String, String>,
    pub fcm_options: FcmOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndroidConfig {
    pub notification: AndroidNotification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndroidNotification {
    pub title: String,
    pub body: String,
    pub sound: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApnsConfig {
    pub payload: ApnsPayload,

    /// APNs cannot carry an inline image; FCM attaches it through here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fcm_options: Option<ApnsFcmOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aps {
    pub alert: ApsAlert,
    pub sound: String,
    pub badge: u32,
    #[serde(rename = "mutable-content")]
    pub mutable_content: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApsAlert {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApnsFcmOptions {
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebpushConfig {
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcmOptions {
    pub analytics_label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FcmResponse {
    /// `projects/{project_id}/messages/{message_id}`
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FcmErrorResponse {
    pub error: FcmError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FcmError {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
