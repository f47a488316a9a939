use crate::domain::error::NotifyError;
use crate::ports::{HttpRequest, HttpResponse, Method, TransportPort};
use async_trait::async_trait;
use gloo_net::http::Request;

/// `fetch`-backed transport. Requests go out same-origin with cookies, which
/// is what the session-authenticated endpoints expect.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

fn map_network_error(error: gloo_net::Error) -> NotifyError {
    NotifyError::transport(error.to_string())
}

#[async_trait(?Send)]
impl TransportPort for FetchTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, NotifyError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match &request.body {
            Some(body) => builder
                .body(body.clone())
                .map_err(map_network_error)?
                .send()
                .await
                .map_err(map_network_error)?,
            None => builder.send().await.map_err(map_network_error)?,
        };

        let status = response.status();
        let body = response.text().await.map_err(map_network_error)?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_unreachable_host_is_transport_error() {
        let request = HttpRequest::new(Method::Get, "http://127.0.0.1:9/notifications/");
        let result = FetchTransport::new().send(&request).await;
        assert!(matches!(result, Err(NotifyError::Transport(_))));
    }
}
