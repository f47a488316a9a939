use crate::domain::error::NotifyError;
use crate::ports::DomPort;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// `DomPort` over the live document.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new() -> Result<Self, NotifyError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| NotifyError::dom("No document available"))?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl DomPort for WebDom {
    type Element = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_first(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn children(&self, element: &Element) -> Vec<Element> {
        let children = element.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn closest(&self, element: &Element, selector: &str) -> Option<Element> {
        element.closest(selector).ok().flatten()
    }

    fn matches(&self, element: &Element, selector: &str) -> bool {
        element.matches(selector).unwrap_or(false)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&self, element: &Element, class: &str) -> Result<(), NotifyError> {
        Ok(element.class_list().add_1(class)?)
    }

    fn remove_class(&self, element: &Element, class: &str) -> Result<(), NotifyError> {
        Ok(element.class_list().remove_1(class)?)
    }

    fn get_attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), NotifyError> {
        Ok(element.set_attribute(name, value)?)
    }

    fn inner_html(&self, element: &Element) -> String {
        element.inner_html()
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn text(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) -> Result<(), NotifyError> {
        let html = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| NotifyError::dom("Styled element is not an HTML element"))?;
        Ok(html.style().set_property(property, value)?)
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn prepend_html(&self, element: &Element, html: &str) -> Result<(), NotifyError> {
        Ok(element.insert_adjacent_html("afterbegin", html)?)
    }
}
