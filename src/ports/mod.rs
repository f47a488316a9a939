/// Ports module - Defines the interfaces (traits) that abstract platform-specific functionality.
///
/// The widget logic in `domain` only talks to these traits. The browser build wires them
/// to `web-sys`, `gloo-net` and `gloo-timers`; native builds wire them to in-memory fakes.

pub mod dom;
pub mod logger;
pub mod page;
pub mod timer;
pub mod transport;

pub use dom::DomPort;
pub use logger::LoggerPort;
pub use page::{PageLocation, PagePort};
pub use timer::TimerPort;
pub use transport::{HttpRequest, HttpResponse, Method, TransportPort};
