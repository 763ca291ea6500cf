use anyhow::{Result, anyhow};

pub fn validate_topic_name(topic: &str) -> Result<()> {
    if topic.is_empty() {
        return Err(anyhow!("Topic name cannot be empty"));
    }

    if topic.len() > 900 {
        return Err(anyhow!("Topic name too long (maximum 900 characters)"));
    }

    if topic.starts_with("/topics/") {
        return Err(anyhow!("Topic name must not include the /topics/ prefix"));
    }

    let valid_chars = topic
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '%'));

    if !valid_chars {
        return Err(anyhow!("Topic name contains invalid characters"));
    }

    Ok(())
}
