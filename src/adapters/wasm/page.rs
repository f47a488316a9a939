use crate::domain::error::NotifyError;
use crate::ports::{PageLocation, PagePort};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// Cookie jar and location of the hosting window.
#[derive(Debug, Clone)]
pub struct BrowserPage {
    document: HtmlDocument,
}

impl BrowserPage {
    pub fn new() -> Result<Self, NotifyError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| NotifyError::dom("No document available"))?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| NotifyError::dom("Document is not an HTML document"))?;
        Ok(Self { document })
    }
}

impl PagePort for BrowserPage {
    fn cookie(&self) -> String {
        self.document.cookie().unwrap_or_default()
    }

    fn location(&self) -> PageLocation {
        match self.document.location() {
            Some(location) => PageLocation::new(
                location.protocol().unwrap_or_default(),
                location.host().unwrap_or_default(),
            ),
            None => PageLocation::new("", ""),
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_reads_cookie_set_by_page() {
        let page = BrowserPage::new().unwrap();
        page.document.set_cookie("csrftoken=browser-token").unwrap();
        assert!(page.cookie().contains("csrftoken=browser-token"));
    }

    #[wasm_bindgen_test]
    fn test_location_matches_window() {
        let page = BrowserPage::new().unwrap();
        let location = page.location();
        assert!(location.protocol.ends_with(':'));
        assert!(!location.host.is_empty());
    }
}
