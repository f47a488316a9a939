use crate::domain::error::NotifyError;
use wasm_bindgen::JsValue;

/// Browser API failures surface as DOM errors unless mapped more precisely
/// at the call site.
impl From<JsValue> for NotifyError {
    fn from(err: JsValue) -> Self {
        NotifyError::dom(
            err.as_string()
                .unwrap_or_else(|| format!("{err:?}")),
        )
    }
}

impl From<NotifyError> for JsValue {
    fn from(error: NotifyError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
