use crate::ports::{PageLocation, PagePort};

/// Page with a fixed cookie string and location.
#[derive(Debug, Clone)]
pub struct FixedPage {
    cookie: String,
    location: PageLocation,
}

impl FixedPage {
    pub fn new(cookie: &str, protocol: &str, host: &str) -> Self {
        Self {
            cookie: cookie.to_string(),
            location: PageLocation::new(protocol, host),
        }
    }
}

impl PagePort for FixedPage {
    fn cookie(&self) -> String {
        self.cookie.clone()
    }

    fn location(&self) -> PageLocation {
        self.location.clone()
    }
}
