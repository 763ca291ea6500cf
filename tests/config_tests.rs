use anyhow::Result;
use reservation_notifier::config::{Config, DEFAULT_IMAGE_URL};

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Test: Only the project id is required
#[test]
fn test_defaults_apply() -> Result<()> {
    let config = Config::from_vars(vars(&[("FCM_PROJECT_ID", "citytours")]))?;

    assert_eq!(config.fcm_project_id, "citytours");
    assert_eq!(config.fcm_base_url, "https://fcm.googleapis.com");
    assert!(!config.fcm_validate_only);
    assert_eq!(config.fcm_access_token, None);
    assert_eq!(config.notification_topic, "nuevas-reservas");
    assert_eq!(config.reservations_collection, "reservas");
    assert_eq!(config.server_port, 8080);

    let settings = config.notification_settings()?;
    assert_eq!(settings.image_url.as_deref(), Some(DEFAULT_IMAGE_URL));
    assert_eq!(settings.display_offset.local_minus_utc(), 0);

    Ok(())
}

/// Test: Overrides are read and an empty image URL disables images
#[test]
fn test_overrides() -> Result<()> {
    let config = Config::from_vars(vars(&[
        ("FCM_PROJECT_ID", "citytours"),
        ("NOTIFICATION_TOPIC", "pruebas"),
        ("NOTIFICATION_IMAGE_URL", ""),
        ("DISPLAY_UTC_OFFSET_MINUTES", "-300"),
        ("FCM_VALIDATE_ONLY", "true"),
        ("SERVER_PORT", "9000"),
    ]))?;

    let settings = config.notification_settings()?;

    assert_eq!(settings.topic, "pruebas");
    assert_eq!(settings.image_url, None);
    assert_eq!(settings.display_offset.local_minus_utc(), -5 * 3600);
    assert!(config.fcm_validate_only);
    assert_eq!(config.server_port, 9000);

    Ok(())
}

/// Test: Invalid settings abort loading
#[test]
fn test_invalid_configuration_is_rejected() {
    assert!(Config::from_vars(vars(&[])).is_err());
    assert!(
        Config::from_vars(vars(&[
            ("FCM_PROJECT_ID", "p"),
            ("NOTIFICATION_TOPIC", "nuevas reservas")
        ]))
        .is_err()
    );
    assert!(
        Config::from_vars(vars(&[
            ("FCM_PROJECT_ID", "p"),
            ("DISPLAY_UTC_OFFSET_MINUTES", "1500")
        ]))
        .is_err()
    );
    assert!(
        Config::from_vars(vars(&[
            ("FCM_PROJECT_ID", "p"),
            ("RESERVATIONS_COLLECTION", "a/b")
        ]))
        .is_err()
    );
}
