pub mod badge;
pub mod clicks;
pub mod config;
pub mod csrf;
pub mod error;
pub mod handlers;
pub mod poller;
pub mod transport;
pub mod types;
pub mod validation;
pub mod widget;

pub use clicks::Click;
pub use config::WidgetConfig;
pub use error::NotifyError;
pub use poller::{Poller, PollerState};
pub use transport::Transport;
pub use types::{
    DeleteResponse, MarkAction, MarkAllResponse, MarkResponse, NotificationPayload,
    UpdateResponse,
};
pub use widget::NotificationWidget;
