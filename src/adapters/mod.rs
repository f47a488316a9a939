/// Adapters module - platform-specific implementations of ports.
///
/// `native` holds the in-memory adapters. On wasm32 they are only built for
/// tests or with the `test-utils` feature.

pub mod global_logger;

#[cfg(any(not(target_arch = "wasm32"), test, feature = "test-utils"))]
pub mod native;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::ConsoleLogger;
#[cfg(not(target_arch = "wasm32"))]
pub use native::ConsoleLogger;

pub use global_logger::logger;
