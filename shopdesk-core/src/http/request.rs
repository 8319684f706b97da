//! Request and response values passed through the handler chain

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// An outgoing backend request
///
/// Builders consume and return the request, so a handler that needs a
/// modified copy clones first and leaves the caller's value untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Set a header, replacing any previous value
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach a JSON body
    pub fn with_json(mut self, body: Value) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Header value as text, if present and printable
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `Authorization` header, if any
    pub fn authorization(&self) -> Option<&str> {
        self.header(&AUTHORIZATION)
    }
}

/// A backend response with its body read to text
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Parse the body into `T`; an empty body parses as JSON `null`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let body = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn builders_set_fields() {
        let req = ApiRequest::post("http://x/categories").with_json(json!({"name": "Shoes"}));
        assert_eq!(*req.method(), Method::POST);
        assert_eq!(req.url(), "http://x/categories");
        assert_eq!(req.header(&CONTENT_TYPE), Some("application/json"));
        assert_eq!(req.body().unwrap()["name"], "Shoes");
        assert_eq!(req.authorization(), None);
    }

    #[test]
    fn with_header_on_clone_leaves_original() {
        let original = ApiRequest::get("http://x/orders");
        let modified = original
            .clone()
            .with_header(AUTHORIZATION, HeaderValue::from_static("Bearer t"));

        assert_eq!(original.authorization(), None);
        assert_eq!(modified.authorization(), Some("Bearer t"));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ack {
        ok: bool,
    }

    #[test]
    fn response_json_parses_typed() {
        let resp = ApiResponse::new(StatusCode::OK, r#"{"ok":true}"#);
        assert_eq!(resp.json::<Ack>().unwrap(), Ack { ok: true });
    }

    #[test]
    fn response_json_reports_decode_error() {
        let resp = ApiResponse::new(StatusCode::OK, "<html>");
        assert!(matches!(resp.json::<Ack>(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn empty_body_parses_as_null() {
        let resp = ApiResponse::new(StatusCode::NO_CONTENT, "");
        assert_eq!(resp.json::<Option<Ack>>().unwrap(), None);
        assert_eq!(resp.json::<Value>().unwrap(), Value::Null);
    }
}
