use super::WebDom;
use crate::domain::clicks;
use crate::domain::error::NotifyError;
use crate::domain::NotificationWidget;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};

/// Binds click handling and spawns the poll loop, once per widget. Returns
/// `false` without side effects when the widget was already started.
pub fn start(widget: Rc<NotificationWidget<WebDom>>) -> Result<bool, NotifyError> {
    if !widget.claim_start() {
        widget
            .platform()
            .logger()
            .warn("Notification widget already started");
        return Ok(false);
    }

    bind_clicks(widget.clone())?;
    let poller = widget.poller();
    spawn_local(async move {
        poller.run().await;
    });
    Ok(true)
}

/// Installs one delegated click listener on the document. Controls added
/// later by the poller are covered as well. The listener is never removed.
fn bind_clicks(widget: Rc<NotificationWidget<WebDom>>) -> Result<(), NotifyError> {
    let document = widget.platform().dom().document().clone();

    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        let Some(click) = clicks::resolve(widget.platform().dom(), widget.config(), &target)
        else {
            return;
        };

        event.prevent_default();
        let widget = widget.clone();
        spawn_local(async move {
            // Failures are already logged by the widget.
            let _ = widget.handle_click(click).await;
        });
    });

    document.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
