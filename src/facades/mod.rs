/// Facades - the JavaScript-facing surface of the widget.

pub mod wasm;
