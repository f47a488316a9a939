use super::config::WidgetConfig;
use crate::ports::DomPort;

/// A click resolved to the widget control it landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click<E> {
    Mark(E),
    MarkAll(E),
    Delete(E),
}

/// Maps the element a click landed on to the control that owns it.
///
/// Mark-all controls answer anywhere on the page. Mark and delete controls
/// only count inside one of the list containers.
pub fn resolve<D: DomPort>(
    dom: &D,
    config: &WidgetConfig,
    target: &D::Element,
) -> Option<Click<D::Element>> {
    if let Some(control) = dom.closest(target, &config.mark_all_selector) {
        return Some(Click::MarkAll(control));
    }

    let lists = config.any_list_selector();
    let in_list = |control: &D::Element| dom.closest(control, &lists).is_some();

    if let Some(control) = dom.closest(target, &config.mark_selector) {
        if in_list(&control) {
            return Some(Click::Mark(control));
        }
    }
    if let Some(control) = dom.closest(target, &config.delete_selector) {
        if in_list(&control) {
            return Some(Click::Delete(control));
        }
    }
    None
}
