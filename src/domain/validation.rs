use super::config::WidgetConfig;
use super::error::NotifyError;

fn validate_not_empty(value: &str, field: &str) -> Result<(), NotifyError> {
    if value.trim().is_empty() {
        return Err(NotifyError::config(format!(
            "{field} cannot be empty or whitespace only"
        )));
    }
    Ok(())
}

fn validate_class_name(value: &str, field: &str) -> Result<(), NotifyError> {
    validate_not_empty(value, field)?;
    if value.chars().any(char::is_whitespace) || value.starts_with('.') {
        return Err(NotifyError::config(format!(
            "{field} must be a bare class name, got '{value}'"
        )));
    }
    Ok(())
}

pub fn validate_notification_id(id: &str) -> Result<(), NotifyError> {
    validate_not_empty(id, "Notification id")
}

pub fn validate_config(config: &WidgetConfig) -> Result<(), NotifyError> {
    validate_not_empty(&config.update_url, "updateUrl")?;
    validate_not_empty(&config.mark_url, "markUrl")?;
    validate_not_empty(&config.mark_all_url, "markAllUrl")?;
    validate_not_empty(&config.delete_url, "deleteUrl")?;

    for (value, field) in [
        (&config.nf_list_selector, "nfListSelector"),
        (&config.nf_selector, "nfSelector"),
        (&config.nf_box_list_selector, "nfBoxListSelector"),
        (&config.nf_box_selector, "nfBoxSelector"),
        (&config.mark_selector, "markSelector"),
        (&config.mark_link_selector, "markLinkSelector"),
        (&config.mark_all_selector, "markAllSelector"),
        (&config.delete_selector, "deleteSelector"),
        (&config.badge_selector, "badgeSelector"),
    ] {
        validate_not_empty(value, field)?;
    }

    validate_class_name(&config.read_class, "readClass")?;
    validate_class_name(&config.unread_class, "unreadClass")?;
    if config.read_class == config.unread_class {
        return Err(NotifyError::config(
            "readClass and unreadClass must differ",
        ));
    }

    validate_not_empty(&config.csrf_cookie_name, "csrfCookieName")?;
    validate_not_empty(&config.csrf_header_name, "csrfHeaderName")?;

    if config.update_interval_ms == 0 {
        return Err(NotifyError::config("updateIntervalMs must be positive"));
    }
    Ok(())
}
