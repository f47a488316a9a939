//! DOM updates applied once a server response arrives.
//!
//! Class and label toggles run for any decoded response. Badge counters only
//! move when the response reports status 200.

use super::badge;
use super::config::WidgetConfig;
use super::error::NotifyError;
use super::types::{
    DeleteResponse, MarkAction, MarkAllResponse, MarkResponse, UpdateResponse, STATUS_OK,
};
use crate::ports::dom::attribute_selector;
use crate::ports::{DomPort, LoggerPort};

pub const NOTIFICATION_ID_ATTR: &str = "data-nf-id";
pub const CONTROL_ID_ATTR: &str = "data-id";
pub const MARK_ACTION_ATTR: &str = "data-mark-action";
pub const TOGGLE_TEXT_ATTR: &str = "data-toggle-text";

const READ_COLOR: &str = "#e0e0e0";
const UNREAD_COLOR: &str = "#000";
const READ_OPACITY: &str = "0.6";
const UNREAD_OPACITY: &str = "1";

fn indicator_style(action: MarkAction) -> (&'static str, &'static str) {
    match action {
        MarkAction::Read => (READ_COLOR, READ_OPACITY),
        MarkAction::Unread => (UNREAD_COLOR, UNREAD_OPACITY),
    }
}

/// Appends `suffix` to every comma-separated group of `selector`.
fn scoped(selector: &str, suffix: &str) -> String {
    selector
        .split(',')
        .map(|group| format!("{}{}", group.trim(), suffix))
        .collect::<Vec<_>>()
        .join(", ")
}

fn swap_state<D: DomPort>(
    dom: &D,
    config: &WidgetConfig,
    item: &D::Element,
    action: MarkAction,
) -> Result<(), NotifyError> {
    let (added, removed) = config.state_classes(action);
    dom.remove_class(item, removed)?;
    dom.add_class(item, added)
}

/// Dims (read) or restores (unread) the item, its mark controls and its
/// mark links for a single notification id.
fn style_indicators<D: DomPort>(
    dom: &D,
    config: &WidgetConfig,
    id: &str,
    action: MarkAction,
) -> Result<(), NotifyError> {
    let (color, opacity) = indicator_style(action);
    let by_control_id = attribute_selector(CONTROL_ID_ATTR, id);

    for item in dom.query_all(&attribute_selector(NOTIFICATION_ID_ATTR, id)) {
        dom.set_style(&item, "color", color)?;
    }
    for control in dom.query_all(&scoped(&config.mark_selector, &by_control_id)) {
        dom.set_style(&control, "color", color)?;
    }
    for link in dom.query_all(&scoped(&config.mark_link_selector, &by_control_id)) {
        dom.set_style(&link, "opacity", opacity)?;
    }
    Ok(())
}

/// Points a mark control at `next` and trades its label with the cached
/// `data-toggle-text` (or "Mark as {next}" the first time).
fn retarget_control<D: DomPort>(
    dom: &D,
    control: &D::Element,
    next: MarkAction,
) -> Result<(), NotifyError> {
    dom.set_attribute(control, MARK_ACTION_ATTR, next.as_str())?;

    let label = dom
        .get_attribute(control, TOGGLE_TEXT_ATTR)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| format!("Mark as {next}"));
    dom.set_attribute(control, TOGGLE_TEXT_ATTR, &dom.inner_html(control))?;
    dom.set_inner_html(control, &label);
    Ok(())
}

/// Flips one notification after a mark request.
///
/// The notification swaps its state classes. When the request came from a
/// mark control, that control's `data-mark-action` switches to the opposite
/// action and its label is retargeted; without one, every notification
/// element carrying `id` is swapped instead. On status 200 the badges move by
/// one and the notification's indicators are dimmed or restored.
pub fn apply_mark_one<D: DomPort>(
    dom: &D,
    logger: &dyn LoggerPort,
    config: &WidgetConfig,
    id: &str,
    control: Option<&D::Element>,
    requested: MarkAction,
    response: &MarkResponse,
) -> Result<(), NotifyError> {
    let applied = MarkAction::from_echo(response.action.as_deref(), requested);

    match control {
        Some(control) => {
            if let Some(item) = dom.closest(control, &config.any_notification_selector()) {
                swap_state(dom, config, &item, applied)?;
            }
            retarget_control(dom, control, applied.opposite())?;
        }
        None => {
            let by_id = attribute_selector(NOTIFICATION_ID_ATTR, id);
            for item in dom.query_all(&scoped(&config.any_notification_selector(), &by_id)) {
                swap_state(dom, config, &item, applied)?;
            }
        }
    }

    if response.status == STATUS_OK {
        let delta = match applied {
            MarkAction::Read => -1,
            MarkAction::Unread => 1,
        };
        badge::adjust(dom, logger, &config.badge_selector, delta);
        style_indicators(dom, config, id, applied)?;
    }
    Ok(())
}

/// Applies one action to every rendered notification, whatever each one's
/// previous state was. Mark controls still offering the applied action are
/// retargeted to its opposite.
pub fn apply_mark_all<D: DomPort>(
    dom: &D,
    logger: &dyn LoggerPort,
    config: &WidgetConfig,
    requested: MarkAction,
    response: &MarkAllResponse,
) -> Result<(), NotifyError> {
    let applied = MarkAction::from_echo(response.action.as_deref(), requested);
    let next = applied.opposite();
    let (color, opacity) = indicator_style(applied);

    for item in dom.query_all(&config.any_notification_selector()) {
        dom.set_style(&item, "color", color)?;
        swap_state(dom, config, &item, applied)?;
    }
    for control in dom.query_all(&config.mark_selector) {
        dom.set_style(&control, "color", color)?;
        if dom.get_attribute(&control, MARK_ACTION_ATTR).as_deref() != Some(next.as_str()) {
            retarget_control(dom, &control, next)?;
        }
    }
    for link in dom.query_all(&config.mark_link_selector) {
        dom.set_style(&link, "opacity", opacity)?;
    }

    if response.status == STATUS_OK {
        let changed = response.succeeded();
        let delta = match applied {
            MarkAction::Read => changed.saturating_neg(),
            MarkAction::Unread => changed,
        };
        badge::adjust(dom, logger, &config.badge_selector, delta);
    }
    Ok(())
}

/// Removes the container of every element carrying the deleted id. An
/// element sitting directly in a list container is its own container.
pub fn apply_delete<D: DomPort>(
    dom: &D,
    logger: &dyn LoggerPort,
    config: &WidgetConfig,
    id: &str,
    response: &DeleteResponse,
) {
    if response.status == STATUS_OK {
        badge::adjust(dom, logger, &config.badge_selector, response.read.saturating_neg());
    }

    let lists = config.any_list_selector();
    for item in dom.query_all(&attribute_selector(NOTIFICATION_ID_ATTR, id)) {
        match dom.parent(&item) {
            Some(parent) if dom.matches(&parent, &lists) => dom.remove(&item),
            Some(parent) => dom.remove(&parent),
            None => {}
        }
    }
}

/// Id carried by the first child of the box list, if any.
pub fn watermark<D: DomPort>(dom: &D, config: &WidgetConfig) -> Option<String> {
    let container = dom.query_first(&config.nf_box_list_selector)?;
    let first = dom.children(&container).into_iter().next()?;
    dom.get_attribute(&first, NOTIFICATION_ID_ATTR)
        .filter(|flag| !flag.trim().is_empty())
}

/// Prepends freshly rendered notifications and refreshes the badges.
/// Returns the watermark after the update.
pub fn apply_update<D: DomPort>(
    dom: &D,
    logger: &dyn LoggerPort,
    config: &WidgetConfig,
    response: &UpdateResponse,
) -> Result<Option<String>, NotifyError> {
    if !response.success {
        logger.warn(&format!(
            "Notification update rejected: {}",
            response.msg.as_deref().unwrap_or("no reason given")
        ));
        return Ok(watermark(dom, config));
    }

    if response.retrieved > 0 || !response.notifications.is_empty() {
        let container = dom.query_first(&config.nf_box_list_selector).ok_or_else(|| {
            NotifyError::dom(format!(
                "No container matches '{}'",
                config.nf_box_list_selector
            ))
        })?;

        // Server order is newest first; prepending in reverse keeps it.
        for notification in response.notifications.iter().rev() {
            if notification.html.is_empty() {
                continue;
            }
            dom.prepend_html(&container, &notification.html)?;
        }
    }

    if let Some(count) = response.unread_count {
        badge::set(dom, &config.badge_selector, count);
    }

    Ok(watermark(dom, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logger;
    use crate::adapters::native::{MemoryDom, NodeId};
    use crate::domain::types::{ItemStatus, NotificationPayload};

    struct Fixture {
        dom: MemoryDom,
        config: WidgetConfig,
        badge: NodeId,
        box_list: NodeId,
    }

    /// Box list with one `<li>` wrapper per notification, each holding the
    /// notification element and its mark/delete controls.
    fn fixture(items: &[(&str, MarkAction)], badge_count: i64) -> Fixture {
        let dom = MemoryDom::new();
        let root = dom.root();
        let badge = dom.append(root, "span", &["notification-badge"], &[]);
        dom.set_text(&badge, &badge_count.to_string());

        let box_list = dom.append(root, "ul", &["notification-box-list"], &[]);
        for &(id, state) in items {
            let wrapper = dom.append(box_list, "li", &[], &[]);
            let item = dom.append(
                wrapper,
                "div",
                &["notification-box", state.as_str()],
                &[("data-nf-id", id)],
            );
            let mark = dom.append(
                item,
                "a",
                &["mark-notification"],
                &[("data-id", id), ("data-mark-action", state.opposite().as_str())],
            );
            dom.set_inner_html(&mark, &format!("Mark as {}", state.opposite()));
            dom.append(item, "span", &["mark-link-notification"], &[("data-id", id)]);
            dom.append(item, "a", &["delete-notification"], &[("data-id", id)]);
        }

        Fixture {
            dom,
            config: WidgetConfig::default(),
            badge,
            box_list,
        }
    }

    fn mark_control(f: &Fixture, id: &str) -> NodeId {
        f.dom
            .query_first(&format!(".mark-notification[data-id=\"{id}\"]"))
            .unwrap()
    }

    fn item(f: &Fixture, id: &str) -> NodeId {
        f.dom
            .query_first(&attribute_selector(NOTIFICATION_ID_ATTR, id))
            .unwrap()
    }

    fn mark_response(status: u16, action: &str) -> MarkResponse {
        MarkResponse {
            status,
            action: Some(action.to_string()),
            msg: None,
        }
    }

    fn assert_single_state(f: &Fixture, id: &str, expected: MarkAction) {
        let el = item(f, id);
        let read = f.dom.has_class(&el, "read");
        let unread = f.dom.has_class(&el, "unread");
        assert!(read ^ unread, "exactly one state class expected on {id}");
        assert_eq!(read, expected == MarkAction::Read);
    }

    #[test]
    fn test_mark_one_read_flips_state_and_action() {
        let f = fixture(&[("1", MarkAction::Unread)], 3);
        let control = mark_control(&f, "1");

        apply_mark_one(
            &f.dom,
            logger(),
            &f.config,
            "1",
            Some(&control),
            MarkAction::Read,
            &mark_response(200, "read"),
        )
        .unwrap();

        assert_single_state(&f, "1", MarkAction::Read);
        assert_eq!(
            f.dom.get_attribute(&control, MARK_ACTION_ATTR).as_deref(),
            Some("unread")
        );
        assert_eq!(f.dom.text(&f.badge), "2");
        assert_eq!(f.dom.style(&item(&f, "1"), "color").as_deref(), Some(READ_COLOR));
    }

    #[test]
    fn test_mark_one_label_swaps_with_cached_text() {
        let f = fixture(&[("1", MarkAction::Unread)], 1);
        let control = mark_control(&f, "1");

        apply_mark_one(
            &f.dom,
            logger(),
            &f.config,
            "1",
            Some(&control),
            MarkAction::Read,
            &mark_response(200, "read"),
        )
        .unwrap();
        assert_eq!(f.dom.inner_html(&control), "Mark as unread");
        assert_eq!(
            f.dom.get_attribute(&control, TOGGLE_TEXT_ATTR).as_deref(),
            Some("Mark as read")
        );

        apply_mark_one(
            &f.dom,
            logger(),
            &f.config,
            "1",
            Some(&control),
            MarkAction::Unread,
            &mark_response(200, "unread"),
        )
        .unwrap();
        assert_eq!(f.dom.inner_html(&control), "Mark as read");
        assert_single_state(&f, "1", MarkAction::Unread);
        assert_eq!(f.dom.text(&f.badge), "1");
        assert_eq!(f.dom.style(&item(&f, "1"), "color").as_deref(), Some(UNREAD_COLOR));
    }

    #[test]
    fn test_mark_one_non_200_toggles_but_keeps_badge() {
        let f = fixture(&[("1", MarkAction::Unread)], 4);
        let control = mark_control(&f, "1");

        apply_mark_one(
            &f.dom,
            logger(),
            &f.config,
            "1",
            Some(&control),
            MarkAction::Read,
            &mark_response(500, "read"),
        )
        .unwrap();

        assert_single_state(&f, "1", MarkAction::Read);
        assert_eq!(f.dom.text(&f.badge), "4");
        assert_eq!(f.dom.style(&item(&f, "1"), "color"), None);
    }

    #[test]
    fn test_mark_all_read_counts_only_successes() {
        let f = fixture(
            &[
                ("1", MarkAction::Unread),
                ("2", MarkAction::Read),
                ("3", MarkAction::Unread),
            ],
            5,
        );
        let response = MarkAllResponse {
            status: 200,
            action: Some("read".to_string()),
            responses: vec![
                ItemStatus { status: 200 },
                ItemStatus { status: 200 },
                ItemStatus { status: 500 },
            ],
            msg: None,
        };

        apply_mark_all(&f.dom, logger(), &f.config, MarkAction::Read, &response).unwrap();

        assert_eq!(f.dom.text(&f.badge), "3");
        for id in ["1", "2", "3"] {
            assert_single_state(&f, id, MarkAction::Read);
        }
        let link = f.dom.query_first(".mark-link-notification").unwrap();
        assert_eq!(f.dom.style(&link, "opacity").as_deref(), Some(READ_OPACITY));
    }

    #[test]
    fn test_mark_all_unread_adds_successes() {
        let f = fixture(&[("1", MarkAction::Read), ("2", MarkAction::Read)], 0);
        let response = MarkAllResponse {
            status: 200,
            action: Some("unread".to_string()),
            responses: vec![ItemStatus { status: 200 }, ItemStatus { status: 200 }],
            msg: None,
        };

        apply_mark_all(&f.dom, logger(), &f.config, MarkAction::Unread, &response).unwrap();

        assert_eq!(f.dom.text(&f.badge), "2");
        assert_single_state(&f, "1", MarkAction::Unread);
        assert_single_state(&f, "2", MarkAction::Unread);
    }

    #[test]
    fn test_mark_all_failed_outer_status_keeps_badge() {
        let f = fixture(&[("1", MarkAction::Unread)], 1);
        let response = MarkAllResponse {
            status: 403,
            action: Some("read".to_string()),
            responses: vec![ItemStatus { status: 200 }],
            msg: None,
        };

        apply_mark_all(&f.dom, logger(), &f.config, MarkAction::Read, &response).unwrap();

        assert_eq!(f.dom.text(&f.badge), "1");
        assert_single_state(&f, "1", MarkAction::Read);
    }

    #[test]
    fn test_mark_one_without_control_swaps_by_id() {
        let f = fixture(&[("1", MarkAction::Unread), ("2", MarkAction::Unread)], 2);

        apply_mark_one(
            &f.dom,
            logger(),
            &f.config,
            "2",
            None,
            MarkAction::Read,
            &mark_response(200, "read"),
        )
        .unwrap();

        assert_single_state(&f, "2", MarkAction::Read);
        assert_single_state(&f, "1", MarkAction::Unread);
        assert_eq!(f.dom.text(&f.badge), "1");
        // The control is left for the next click to retarget.
        assert_eq!(
            f.dom.get_attribute(&mark_control(&f, "2"), MARK_ACTION_ATTR).as_deref(),
            Some("read")
        );
    }

    fn mark_all_response(action: &str, succeeded: usize) -> MarkAllResponse {
        MarkAllResponse {
            status: 200,
            action: Some(action.to_string()),
            responses: vec![ItemStatus { status: 200 }; succeeded],
            msg: None,
        }
    }

    fn assert_controls(f: &Fixture, ids: &[&str], action: &str, label: &str) {
        for id in ids {
            let control = mark_control(f, id);
            assert_eq!(
                f.dom.get_attribute(&control, MARK_ACTION_ATTR).as_deref(),
                Some(action),
                "mark action of {id}"
            );
            assert_eq!(f.dom.inner_html(&control), label, "label of {id}");
        }
    }

    #[test]
    fn test_mark_all_retargets_every_control() {
        let f = fixture(&[("1", MarkAction::Unread), ("2", MarkAction::Read)], 1);

        apply_mark_all(
            &f.dom,
            logger(),
            &f.config,
            MarkAction::Read,
            &mark_all_response("read", 1),
        )
        .unwrap();
        assert_controls(&f, &["1", "2"], "unread", "Mark as unread");
        assert_eq!(f.dom.text(&f.badge), "0");

        apply_mark_all(
            &f.dom,
            logger(),
            &f.config,
            MarkAction::Unread,
            &mark_all_response("unread", 2),
        )
        .unwrap();
        assert_controls(&f, &["1", "2"], "read", "Mark as read");
        assert_single_state(&f, "1", MarkAction::Unread);
        assert_single_state(&f, "2", MarkAction::Unread);
        assert_eq!(f.dom.text(&f.badge), "2");
    }

    #[test]
    fn test_mark_one_after_mark_all_continues_from_new_state() {
        let f = fixture(&[("1", MarkAction::Unread)], 1);
        apply_mark_all(
            &f.dom,
            logger(),
            &f.config,
            MarkAction::Read,
            &mark_all_response("read", 1),
        )
        .unwrap();

        let control = mark_control(&f, "1");
        let next: MarkAction = f
            .dom
            .get_attribute(&control, MARK_ACTION_ATTR)
            .unwrap()
            .parse()
            .unwrap();
        apply_mark_one(
            &f.dom,
            logger(),
            &f.config,
            "1",
            Some(&control),
            next,
            &mark_response(200, next.as_str()),
        )
        .unwrap();

        assert_single_state(&f, "1", MarkAction::Unread);
        assert_eq!(f.dom.text(&f.badge), "1");
    }

    #[test]
    fn test_delete_in_flat_box_list_removes_only_the_item() {
        let f = fixture(&[], 2);
        for id in ["2", "1"] {
            f.dom
                .append(f.box_list, "li", &["notification-box"], &[("data-nf-id", id)]);
        }
        assert_eq!(watermark(&f.dom, &f.config).as_deref(), Some("2"));

        let response = DeleteResponse {
            status: 200,
            read: 1,
            msg: None,
        };
        apply_delete(&f.dom, logger(), &f.config, "1", &response);

        assert!(f.dom.is_attached(&f.box_list));
        assert_eq!(f.dom.children(&f.box_list).len(), 1);
        assert_eq!(watermark(&f.dom, &f.config).as_deref(), Some("2"));
        assert_eq!(f.dom.text(&f.badge), "1");
    }

    #[test]
    fn test_delete_with_extreme_read_count_saturates() {
        let f = fixture(&[("1", MarkAction::Unread)], 0);
        let response = DeleteResponse {
            status: 200,
            read: i64::MIN,
            msg: None,
        };

        apply_delete(&f.dom, logger(), &f.config, "1", &response);

        assert_eq!(f.dom.text(&f.badge), i64::MAX.to_string());
    }

    #[test]
    fn test_delete_removes_only_its_container() {
        let f = fixture(&[("1", MarkAction::Unread), ("2", MarkAction::Unread)], 2);
        let response = DeleteResponse {
            status: 200,
            read: 1,
            msg: None,
        };

        apply_delete(&f.dom, logger(), &f.config, "1", &response);

        assert!(f.dom.query_first("[data-nf-id=\"1\"]").is_none());
        assert!(f.dom.query_first("[data-nf-id=\"2\"]").is_some());
        assert_eq!(f.dom.children(&f.box_list).len(), 1);
        assert_eq!(f.dom.text(&f.badge), "1");
    }

    #[test]
    fn test_delete_non_200_removes_but_keeps_badge() {
        let f = fixture(&[("1", MarkAction::Unread)], 2);
        let response = DeleteResponse {
            status: 404,
            read: 1,
            msg: None,
        };

        apply_delete(&f.dom, logger(), &f.config, "1", &response);

        assert!(f.dom.query_first("[data-nf-id=\"1\"]").is_none());
        assert_eq!(f.dom.text(&f.badge), "2");
    }

    #[test]
    fn test_watermark_reads_first_child() {
        let f = fixture(&[("9", MarkAction::Unread), ("8", MarkAction::Read)], 0);
        // The first child of the box list is the `<li>` wrapper, not the item.
        assert_eq!(watermark(&f.dom, &f.config), None);

        let direct = fixture(&[], 0);
        direct.dom.append(
            direct.box_list,
            "li",
            &["notification-box"],
            &[("data-nf-id", "42")],
        );
        assert_eq!(watermark(&direct.dom, &direct.config).as_deref(), Some("42"));
    }

    #[test]
    fn test_update_prepends_in_server_order() {
        let f = fixture(&[], 0);
        f.dom
            .append(f.box_list, "li", &["notification-box"], &[("data-nf-id", "42")]);

        let response = UpdateResponse {
            success: true,
            msg: None,
            retrieved: 2,
            unread_count: Some(7),
            notifications: vec![
                NotificationPayload {
                    id: "44".to_string(),
                    html: "<li class=\"notification-box unread\" data-nf-id=\"44\">b</li>"
                        .to_string(),
                },
                NotificationPayload {
                    id: "43".to_string(),
                    html: "<li class=\"notification-box unread\" data-nf-id=\"43\">a</li>"
                        .to_string(),
                },
            ],
        };

        let flag = apply_update(&f.dom, logger(), &f.config, &response).unwrap();

        assert_eq!(flag.as_deref(), Some("44"));
        let ids: Vec<_> = f
            .dom
            .children(&f.box_list)
            .iter()
            .filter_map(|child| f.dom.get_attribute(child, NOTIFICATION_ID_ATTR))
            .collect();
        assert_eq!(ids, vec!["44", "43", "42"]);
        assert_eq!(f.dom.text(&f.badge), "7");
    }

    #[test]
    fn test_update_rejection_leaves_dom() {
        let f = fixture(&[], 3);
        let response = UpdateResponse {
            success: false,
            msg: Some("Notification flag not sent.".to_string()),
            retrieved: 0,
            unread_count: None,
            notifications: vec![],
        };

        let flag = apply_update(&f.dom, logger(), &f.config, &response).unwrap();

        assert_eq!(flag, None);
        assert_eq!(f.dom.text(&f.badge), "3");
    }

    #[test]
    fn test_scoped_selector_applies_to_each_group() {
        assert_eq!(
            scoped(".a, .b", "[data-id=\"1\"]"),
            ".a[data-id=\"1\"], .b[data-id=\"1\"]"
        );
    }
}
