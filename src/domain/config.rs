use super::types::MarkAction;
use serde::{Deserialize, Serialize};

/// Widget configuration supplied by the host page.
///
/// Every field is optional on the JS side; missing keys fall back to the
/// defaults the server-side templates render with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub update_url: String,
    pub mark_url: String,
    pub mark_all_url: String,
    pub delete_url: String,

    /// Full-page notification list.
    pub nf_list_selector: String,
    /// Individual notification in the full-page list.
    pub nf_selector: String,
    /// Notification list inside the dropdown box. Its first child carries the
    /// polling watermark.
    pub nf_box_list_selector: String,
    /// Individual notification inside the dropdown box.
    pub nf_box_selector: String,

    pub mark_selector: String,
    pub mark_link_selector: String,
    pub mark_all_selector: String,
    pub delete_selector: String,
    pub badge_selector: String,

    pub read_class: String,
    pub unread_class: String,

    pub csrf_cookie_name: String,
    pub csrf_header_name: String,

    /// Delay between the completion of one poll and the start of the next.
    pub update_interval_ms: u32,
    /// Rendering target forwarded to the update endpoint.
    pub poll_target: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            update_url: "/notifications/api/update/".to_string(),
            mark_url: "/notifications/mark/".to_string(),
            mark_all_url: "/notifications/mark-all/".to_string(),
            delete_url: "/notifications/delete/".to_string(),
            nf_list_selector: ".notifications".to_string(),
            nf_selector: ".notification".to_string(),
            nf_box_list_selector: ".notification-box-list".to_string(),
            nf_box_selector: ".notification-box".to_string(),
            mark_selector: ".mark-notification".to_string(),
            mark_link_selector: ".mark-link-notification".to_string(),
            mark_all_selector: ".mark-all-notifications".to_string(),
            delete_selector: ".delete-notification".to_string(),
            badge_selector: ".notification-badge".to_string(),
            read_class: "read".to_string(),
            unread_class: "unread".to_string(),
            csrf_cookie_name: "csrftoken".to_string(),
            csrf_header_name: "X-CSRFToken".to_string(),
            update_interval_ms: 5000,
            poll_target: "box".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Every container a notification can be rendered into.
    pub fn any_list_selector(&self) -> String {
        format!("{}, {}", self.nf_box_list_selector, self.nf_list_selector)
    }

    /// Every element that represents a single notification.
    pub fn any_notification_selector(&self) -> String {
        format!("{}, {}", self.nf_selector, self.nf_box_selector)
    }

    /// Returns the (added, removed) class pair for the state an action leads to.
    pub fn state_classes(&self, action: MarkAction) -> (&str, &str) {
        match action {
            MarkAction::Read => (&self.read_class, &self.unread_class),
            MarkAction::Unread => (&self.unread_class, &self.read_class),
        }
    }
}
