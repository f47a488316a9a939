use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    Config(String),
    Transport(String),
    Decode(String),
    Dom(String),
    InvalidAction(String),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            NotifyError::Transport(msg) => write!(f, "Transport Error: {msg}"),
            NotifyError::Decode(msg) => write!(f, "Decode Error: {msg}"),
            NotifyError::Dom(msg) => write!(f, "DOM Error: {msg}"),
            NotifyError::InvalidAction(action) => write!(f, "Invalid mark action: '{action}'"),
        }
    }
}

impl std::error::Error for NotifyError {}

impl NotifyError {
    pub fn config(message: impl Into<String>) -> Self {
        NotifyError::Config(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        NotifyError::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        NotifyError::Decode(message.into())
    }

    pub fn dom(message: impl Into<String>) -> Self {
        NotifyError::Dom(message.into())
    }
}
