use std::collections::HashMap;

use crate::{
    models::{
        fcm::{
            AndroidConfig, AndroidNotification, ApnsConfig, ApnsFcmOptions, ApnsPayload, Aps,
            ApsAlert, FcmMessage, FcmNotification, FcmOptions, WebpushConfig,
        },
        notification::NotificationSettings,
        reservation::{ReservationDate, ReservationRecord},
    },
    utils::format_reservation_date,
};

pub const TITLE: &str = "🎉 ¡Nueva reserva!";
pub const DEFAULT_CUSTOMER_NAME: &str = "Cliente";
pub const DEFAULT_PARTY_SIZE: i64 = 1;
pub const DEFAULT_SHIFT: &str = "turno";
pub const MISSING_DATE: &str = "sin fecha";
pub const SCREEN: &str = "reservas";
pub const ANALYTICS_LABEL: &str = "nueva_reserva";
pub const DEFAULT_SOUND: &str = "default";

/// Builds the topic message announcing a new reservation.
///
/// Empty strings and a party size of zero fall back to the defaults, the
/// same as missing fields.
pub fn build_notification(
    record: &ReservationRecord,
    reservation_id: &str,
    settings: &NotificationSettings,
) -> FcmMessage {
    let customer_name = record
        .customer_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_CUSTOMER_NAME);
    let party_size = record
        .party_size
        .as_ref()
        .filter(|size| !size.is_blank())
        .map(ToString::to_string)
        .unwrap_or_else(|| DEFAULT_PARTY_SIZE.to_string());
    let shift = record
        .shift
        .as_deref()
        .filter(|shift| !shift.is_empty())
        .unwrap_or(DEFAULT_SHIFT);

    let date = match record.reservation_date {
        ReservationDate::Present(timestamp) => {
            format_reservation_date(&timestamp, &settings.display_offset)
        }
        ReservationDate::Absent => MISSING_DATE.to_string(),
    };

    let body = format!(
        "Cliente: {} ({} pax, {}, {})",
        customer_name, party_size, shift, date
    );

    let data = HashMap::from([
        ("reservaId".to_string(), reservation_id.to_string()),
        ("screen".to_string(), SCREEN.to_string()),
        ("nombreCliente".to_string(), customer_name.to_string()),
        ("turno".to_string(), shift.to_string()),
        ("fechaReserva".to_string(), date),
        ("pax".to_string(), party_size),
    ]);

    FcmMessage {
        topic: settings.topic.clone(),
        notification: FcmNotification {
            title: TITLE.to_string(),
            body: body.clone(),
            image: settings.image_url.clone(),
        },
        android: AndroidConfig {
            notification: AndroidNotification {
                title: TITLE.to_string(),
                body: body.clone(),
                sound: DEFAULT_SOUND.to_string(),
                image: settings.image_url.clone(),
            },
        },
        apns: ApnsConfig {
            payload: ApnsPayload {
                aps: Aps {
                    alert: ApsAlert {
                        title: TITLE.to_string(),
                        body,
                    },
                    sound: DEFAULT_SOUND.to_string(),
                    badge: 1,
                    mutable_content: 1,
                },
            },
            fcm_options: settings
                .image_url
                .clone()
                .map(|image| ApnsFcmOptions { image }),
        },
        webpush: WebpushConfig {
            headers: HashMap::from([("Urgency".to_string(), "high".to_string())]),
        },
        data,
        fcm_options: FcmOptions {
            analytics_label: ANALYTICS_LABEL.to_string(),
        },
    }
}
