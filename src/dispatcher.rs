use std::sync::Arc;

use anyhow::{Error, Result};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    builder::build_notification,
    clients::PushSink,
    models::{
        health::ServiceHealth, notification::NotificationSettings,
        reservation::ReservationCreated, status::DispatchStatus,
    },
};

/// Turns reservation creations into topic notifications, one send per event.
pub struct Dispatcher {
    sink: Arc<dyn PushSink>,
    settings: NotificationSettings,
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn PushSink>, settings: NotificationSettings) -> Self {
        Self { sink, settings }
    }

    pub async fn on_reservation_created(&self, event: &ReservationCreated) -> Result<String, Error> {
        let invocation_id = Uuid::new_v4();

        info!(
            %invocation_id,
            reservation_id = %event.reservation_id,
            fields = ?event.fields,
            status = %DispatchStatus::Received,
            "New reservation detected"
        );

        let message = build_notification(&event.record, &event.reservation_id, &self.settings);

        debug!(
            %invocation_id,
            body = %message.notification.body,
            status = %DispatchStatus::Built,
            "Notification built"
        );

        match self.sink.send(&message).await {
            Ok(message_id) => {
                info!(
                    %invocation_id,
                    reservation_id = %event.reservation_id,
                    topic = %message.topic,
                    %message_id,
                    status = %DispatchStatus::Sent,
                    "Notification sent to topic"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    %invocation_id,
                    reservation_id = %event.reservation_id,
                    topic = %message.topic,
                    error = %e,
                    status = %DispatchStatus::Failed,
                    "Failed to send notification"
                );
                Err(e)
            }
        }
    }

    pub async fn sink_health(&self) -> ServiceHealth {
        self.sink.health().await
    }
}
