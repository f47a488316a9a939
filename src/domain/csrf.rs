//! Anti-forgery token handling for state-changing requests.
//!
//! The token lives in a cookie set by the server. It is only ever sent to
//! same-origin URLs and only with methods that can change server state.

use crate::ports::{HttpRequest, PageLocation};

/// Looks up a cookie by name in a `document.cookie` string and
/// percent-decodes its value.
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| {
            cookie
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .map(|raw| {
            urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
}

/// Methods that do not require CSRF protection.
pub fn is_safe_method(method: &str) -> bool {
    matches!(
        method.to_ascii_uppercase().as_str(),
        "GET" | "HEAD" | "OPTIONS" | "TRACE"
    )
}

/// Whether `url` targets the page's own origin. Relative URLs always do;
/// absolute and scheme-relative URLs must name the page's host.
pub fn same_origin(url: &str, location: &PageLocation) -> bool {
    let origin = location.origin();
    let scheme_relative = location.scheme_relative_origin();

    let under = |prefix: &str| {
        url == prefix
            || url
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    };

    if under(&origin) || under(&scheme_relative) {
        return true;
    }

    !(url.starts_with("//") || url.starts_with("http:") || url.starts_with("https:"))
}

/// Attaches `token` under `header` when the request warrants it.
pub fn attach_token(
    request: &mut HttpRequest,
    token: Option<&str>,
    header: &str,
    location: &PageLocation,
) {
    let Some(token) = token else {
        return;
    };
    if !is_safe_method(request.method.as_str()) && same_origin(&request.url, location) {
        request.set_header(header, token);
    }
}
