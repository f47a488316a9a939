/// Native adapters - in-memory implementations used off the browser, mainly by tests.

pub mod console_logger;
pub mod memory_dom;
pub mod mock_transport;
pub mod page;
pub mod selector;
pub mod timer;

pub use console_logger::ConsoleLogger;
pub use memory_dom::{MemoryDom, NodeId};
pub use mock_transport::MockTransport;
pub use page::FixedPage;
pub use timer::RecordingTimer;
