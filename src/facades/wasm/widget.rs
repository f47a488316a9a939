use super::converters;
use crate::adapters::wasm::{events, WebDom};
use crate::domain::NotificationWidget;
use crate::platform::Platform;
use js_sys::Promise;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Notification widget bound to the current page.
///
/// ```js
/// const widget = new NotifyWidget({ updateIntervalMs: 10000 });
/// widget.start();
/// await widget.markAll("read");
/// ```
#[wasm_bindgen]
pub struct NotifyWidget {
    inner: Rc<NotificationWidget<WebDom>>,
}

#[wasm_bindgen]
impl NotifyWidget {
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<NotifyWidget, JsValue> {
        let config = converters::js_value_to_config(settings)?;
        let platform = Platform::new()?;
        let inner = NotificationWidget::new(platform, config)?;
        Ok(NotifyWidget {
            inner: Rc::new(inner),
        })
    }

    /// Binds click handling and starts polling for new notifications.
    /// Later calls do nothing.
    pub fn start(&self) -> Result<(), JsValue> {
        events::start(self.inner.clone())?;
        Ok(())
    }

    pub fn mark(&self, id: String, action: String) -> Promise {
        future_to_promise(mark(self.inner.clone(), id, action))
    }

    #[wasm_bindgen(js_name = markAll)]
    pub fn mark_all(&self, action: String) -> Promise {
        future_to_promise(mark_all(self.inner.clone(), action))
    }

    pub fn delete(&self, id: String) -> Promise {
        future_to_promise(delete(self.inner.clone(), id))
    }

    /// Runs a single update cycle. Resolves to `false` when polling is
    /// disabled because the page has no notification box, and rejects once
    /// `start()` has launched the poll loop.
    pub fn poll(&self) -> Promise {
        future_to_promise(poll(self.inner.clone()))
    }
}

async fn mark(
    widget: Rc<NotificationWidget<WebDom>>,
    id: String,
    action: String,
) -> Result<JsValue, JsValue> {
    let action = converters::js_value_to_action(&action)?;
    widget.mark_by_id(&id, action).await?;
    Ok(JsValue::UNDEFINED)
}

async fn mark_all(
    widget: Rc<NotificationWidget<WebDom>>,
    action: String,
) -> Result<JsValue, JsValue> {
    let action = converters::js_value_to_action(&action)?;
    widget.mark_all(action).await?;
    Ok(JsValue::UNDEFINED)
}

async fn delete(widget: Rc<NotificationWidget<WebDom>>, id: String) -> Result<JsValue, JsValue> {
    widget.delete_by_id(&id).await?;
    Ok(JsValue::UNDEFINED)
}

async fn poll(widget: Rc<NotificationWidget<WebDom>>) -> Result<JsValue, JsValue> {
    if widget.is_started() {
        return Err(converters::to_js_error("Poll loop already running"));
    }
    let polls = widget.poller().run_cycles(Some(1)).await;
    Ok(JsValue::from_bool(polls > 0))
}
