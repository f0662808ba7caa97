use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use http::Method;
use serde::Serialize;

use crate::error::ApiError;

/// Method, headers and body of a request. Forwarded untouched to every
/// candidate base, so the body is kept as owned bytes that can be resent.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    /// `credentials` member of the `fetch` init.
    #[cfg(target_arch = "wasm32")]
    pub credentials: Option<web_sys::RequestCredentials>,
    /// `mode` member of the `fetch` init.
    #[cfg(target_arch = "wasm32")]
    pub mode: Option<web_sys::RequestMode>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Parses a method given as text, case-insensitively, as `fetch` does
    /// for the standard methods.
    pub fn with_method_name(method: &str) -> Result<Self, ApiError> {
        Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map(Self::new)
            .map_err(|_| ApiError::InvalidMethod {
                method: method.to_string(),
            })
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Appends a header given as text, keeping earlier values of the same name.
    pub fn text_header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let invalid = || ApiError::InvalidHeader {
            name: name.to_string(),
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        self.headers.append(name, value);
        Ok(self)
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Headers as string pairs, for transports that cannot carry raw bytes.
    pub fn header_pairs(&self) -> Result<Vec<(&str, &str)>, ApiError> {
        self.headers
            .iter()
            .map(|(name, value)| {
                value
                    .to_str()
                    .map(|value| (name.as_str(), value))
                    .map_err(|_| ApiError::InvalidHeaderValue {
                        name: name.as_str().to_string(),
                    })
            })
            .collect()
    }

    /// Serializes `value` as the body and sets `Content-Type: application/json`.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::AUTHORIZATION;
    use serde_json::json;

    #[test]
    fn test_default_is_get_without_body() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
    }

    #[test]
    fn test_method_name_is_case_insensitive() {
        assert_eq!(RequestOptions::with_method_name("post").unwrap().method, Method::POST);
        assert_eq!(RequestOptions::with_method_name("PATCH").unwrap().method, Method::PATCH);
        assert!(matches!(
            RequestOptions::with_method_name("GE T"),
            Err(ApiError::InvalidMethod { method }) if method == "GE T"
        ));
    }

    #[test]
    fn test_text_headers_are_appended() {
        let options = RequestOptions::get()
            .text_header("Authorization", "Bearer abc")
            .unwrap()
            .text_header("X-Trace", "1")
            .unwrap()
            .text_header("x-trace", "2")
            .unwrap();
        assert_eq!(options.headers[AUTHORIZATION], "Bearer abc");
        assert_eq!(options.headers.get_all("x-trace").iter().count(), 2);
    }

    #[test]
    fn test_invalid_text_header_is_rejected() {
        let err = RequestOptions::get().text_header("bad name", "v").unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader { name } if name == "bad name"));

        let err = RequestOptions::get().text_header("x-ok", "line\nbreak").unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader { name } if name == "x-ok"));
    }

    #[test]
    fn test_header_pairs() {
        let options = RequestOptions::get()
            .header(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(
            options.header_pairs().unwrap(),
            vec![("authorization", "Bearer abc")]
        );
    }

    #[test]
    fn test_header_pairs_rejects_opaque_values() {
        let options = RequestOptions::get()
            .header(AUTHORIZATION, HeaderValue::from_bytes(b"caf\xe9").unwrap());
        assert!(matches!(
            options.header_pairs(),
            Err(ApiError::InvalidHeaderValue { name }) if name == "authorization"
        ));
    }

    #[test]
    fn test_json_sets_body_and_content_type() {
        let options = RequestOptions::post()
            .json(&json!({ "email": "a@b.c" }))
            .unwrap();
        assert_eq!(options.method, Method::POST);
        assert_eq!(options.headers[CONTENT_TYPE], "application/json");
        assert_eq!(options.body.as_deref(), Some(br#"{"email":"a@b.c"}"#.as_slice()));
    }
}
