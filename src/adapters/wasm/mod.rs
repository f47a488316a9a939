/// WASM adapters - implementations using browser APIs.

pub mod console_logger;
pub mod error_conversions;
pub mod events;
pub mod fetch_transport;
pub mod page;
pub mod timer;
pub mod web_dom;

pub use console_logger::ConsoleLogger;
pub use fetch_transport::FetchTransport;
pub use page::BrowserPage;
pub use timer::GlooTimer;
pub use web_dom::WebDom;
