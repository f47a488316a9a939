// Hexagonal architecture modules
pub mod adapters;
pub mod domain;
pub mod platform;
pub mod ports;

#[cfg(target_arch = "wasm32")]
pub mod facades;

pub use domain::{MarkAction, NotificationWidget, NotifyError, Poller, WidgetConfig};
#[cfg(target_arch = "wasm32")]
pub use facades::wasm::NotifyWidget;
pub use platform::Platform;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start_app() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    Ok(())
}
