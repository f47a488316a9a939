use crate::domain::error::NotifyError;

/// DOM port - the selector/class/attribute primitives the widget needs.
///
/// `Element` is an opaque handle. Queries that find nothing return empty
/// collections instead of errors; only mutations can fail.
pub trait DomPort {
    type Element: Clone;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    fn query_first(&self, selector: &str) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }

    fn children(&self, element: &Self::Element) -> Vec<Self::Element>;

    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// The element itself or its nearest ancestor matching `selector`.
    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;

    fn matches(&self, element: &Self::Element, selector: &str) -> bool;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn add_class(&self, element: &Self::Element, class: &str) -> Result<(), NotifyError>;

    fn remove_class(&self, element: &Self::Element, class: &str) -> Result<(), NotifyError>;

    fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), NotifyError>;

    fn inner_html(&self, element: &Self::Element) -> String;

    fn set_inner_html(&self, element: &Self::Element, html: &str);

    fn text(&self, element: &Self::Element) -> String;

    fn set_text(&self, element: &Self::Element, text: &str);

    fn set_style(
        &self,
        element: &Self::Element,
        property: &str,
        value: &str,
    ) -> Result<(), NotifyError>;

    /// Detaches the element (and its subtree) from the document.
    fn remove(&self, element: &Self::Element);

    /// Inserts `html` as the first child content of `element`.
    fn prepend_html(&self, element: &Self::Element, html: &str) -> Result<(), NotifyError>;
}

/// `[name="value"]` with the value escaped for a quoted CSS string.
pub fn attribute_selector(name: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{name}=\"{escaped}\"]")
}
