use crate::domain::{MarkAction, WidgetConfig};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

pub fn to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Reads a camelCase settings object. `undefined` and `null` select the
/// defaults; unknown keys are ignored.
pub fn js_value_to_config(value: JsValue) -> Result<WidgetConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(WidgetConfig::default());
    }
    from_value(value).map_err(|e| to_js_error(format!("Invalid widget settings: {e}")))
}

pub fn js_value_to_action(value: &str) -> Result<MarkAction, JsValue> {
    value.parse::<MarkAction>().map_err(to_js_error)
}
