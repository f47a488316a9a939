use super::config::WidgetConfig;
use super::csrf;
use super::error::NotifyError;
use super::types::{
    decode_body, DeleteResponse, MarkAction, MarkAllResponse, MarkResponse, UpdateResponse,
};
use crate::ports::{HttpRequest, Method, PagePort, TransportPort};
use std::rc::Rc;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// `key=value&…` with percent-encoded keys and values.
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the four requests the widget knows about and decodes their
/// responses. Network access goes through the injected `TransportPort`.
#[derive(Clone)]
pub struct Transport {
    config: Rc<WidgetConfig>,
    port: Rc<dyn TransportPort>,
    page: Rc<dyn PagePort>,
}

impl Transport {
    pub fn new(
        config: Rc<WidgetConfig>,
        port: Rc<dyn TransportPort>,
        page: Rc<dyn PagePort>,
    ) -> Self {
        Self { config, port, page }
    }

    fn plan(&self, method: Method, url: String, form: &[(&str, &str)]) -> HttpRequest {
        let mut request = HttpRequest::new(method, url);
        request.set_header("X-Requested-With", "XMLHttpRequest");

        if method == Method::Post {
            request.set_header("Content-Type", FORM_CONTENT_TYPE);
            request.body = Some(encode_form(form));
        }

        let token = csrf::get_cookie(&self.page.cookie(), &self.config.csrf_cookie_name);
        csrf::attach_token(
            &mut request,
            token.as_deref(),
            &self.config.csrf_header_name,
            &self.page.location(),
        );
        request
    }

    pub fn plan_mark_one(&self, id: &str, action: MarkAction) -> HttpRequest {
        self.plan(
            Method::Post,
            self.config.mark_url.clone(),
            &[("id", id), ("action", action.as_str())],
        )
    }

    pub fn plan_mark_all(&self, action: MarkAction) -> HttpRequest {
        self.plan(
            Method::Post,
            self.config.mark_all_url.clone(),
            &[("action", action.as_str())],
        )
    }

    pub fn plan_delete_one(&self, id: &str) -> HttpRequest {
        self.plan(Method::Post, self.config.delete_url.clone(), &[("id", id)])
    }

    pub fn plan_poll_updates(&self, flag: &str) -> HttpRequest {
        let separator = if self.config.update_url.contains('?') {
            '&'
        } else {
            '?'
        };
        let url = format!(
            "{}{}{}",
            self.config.update_url,
            separator,
            encode_form(&[("flag", flag), ("target", self.config.poll_target.as_str())])
        );
        self.plan(Method::Get, url, &[])
    }

    async fn exchange<T>(&self, request: HttpRequest) -> Result<T, NotifyError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let response = self.port.send(&request).await?;
        decode_body(response.status, &response.body)
    }

    pub async fn mark_one(&self, id: &str, action: MarkAction) -> Result<MarkResponse, NotifyError> {
        self.exchange(self.plan_mark_one(id, action)).await
    }

    pub async fn mark_all(&self, action: MarkAction) -> Result<MarkAllResponse, NotifyError> {
        self.exchange(self.plan_mark_all(action)).await
    }

    pub async fn delete_one(&self, id: &str) -> Result<DeleteResponse, NotifyError> {
        self.exchange(self.plan_delete_one(id)).await
    }

    pub async fn poll_updates(&self, flag: &str) -> Result<UpdateResponse, NotifyError> {
        self.exchange(self.plan_poll_updates(flag)).await
    }
}
