/// Protocol and host of the page the widget runs in, as exposed by
/// `document.location`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme with its trailing colon, e.g. `https:`.
    pub protocol: String,
    /// Host name plus optional port.
    pub host: String,
}

impl PageLocation {
    pub fn new(protocol: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
        }
    }

    /// `//host`
    pub fn scheme_relative_origin(&self) -> String {
        format!("//{}", self.host)
    }

    /// `protocol//host`
    pub fn origin(&self) -> String {
        format!("{}//{}", self.protocol, self.host)
    }
}

/// Port for page-level state that lives outside the notification markup.
pub trait PagePort {
    /// Raw `document.cookie` string.
    fn cookie(&self) -> String;

    fn location(&self) -> PageLocation;
}
