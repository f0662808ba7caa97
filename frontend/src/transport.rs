//! The network primitive the dispatcher forwards requests to.

use crate::error::ApiError;
use crate::options::RequestOptions;

/// Anything the dispatcher can read a status code from.
pub trait ApiResponse {
    fn status(&self) -> u16;
}

/// Issues one request against one fully-joined URL. Implementations must not
/// retry; the candidate walk is the dispatcher's job.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type Response: ApiResponse;
    type Error: std::error::Error;

    async fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<Self::Response, Self::Error>;
}

impl ApiResponse for reqwest::Response {
    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }
}

/// `reqwest`-backed transport. Relative URLs are resolved against `origin`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    origin: Option<String>,
}

impl ReqwestTransport {
    pub fn new(origin: Option<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, origin))
    }

    pub fn with_client(client: reqwest::Client, origin: Option<String>) -> Self {
        Self {
            client,
            origin: origin.map(|origin| origin.trim_end_matches('/').to_string()),
        }
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    fn absolute_url(&self, url: &str) -> Result<String, ApiError> {
        if !url.starts_with('/') {
            return Ok(url.to_string());
        }

        match &self.origin {
            Some(origin) => Ok(format!("{}{}", origin, url)),
            None => Err(ApiError::MissingOrigin {
                url: url.to_string(),
            }),
        }
    }
}

impl Transport for ReqwestTransport {
    type Response = reqwest::Response;
    type Error = ApiError;

    async fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.absolute_url(url)?;

        let mut request = self
            .client
            .request(options.method.clone(), url)
            .headers(options.headers.clone());

        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }

        Ok(request.send().await?)
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserTransport;

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo_net::http::{RequestBuilder, Response};

    use super::{ApiResponse, Transport};
    use crate::error::ApiError;
    use crate::options::RequestOptions;

    impl ApiResponse for Response {
        fn status(&self) -> u16 {
            Response::status(self)
        }
    }

    /// Transport over the page's own `fetch`. Relative URLs resolve against
    /// the document, exactly as a hand-written `fetch` call would.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserTransport;

    impl Transport for BrowserTransport {
        type Response = Response;
        type Error = ApiError;

        async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Response, ApiError> {
            let mut builder = RequestBuilder::new(url).method(options.method.clone());

            for (name, value) in options.header_pairs()? {
                builder = builder.header(name, value);
            }
            if let Some(credentials) = options.credentials {
                builder = builder.credentials(credentials);
            }
            if let Some(mode) = options.mode {
                builder = builder.mode(mode);
            }

            let request = match &options.body {
                Some(body) => builder.body(js_sys::Uint8Array::from(body.as_slice()))?,
                None => builder.build()?,
            };

            Ok(request.send().await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_url_uses_origin() {
        let transport = ReqwestTransport::with_client(
            reqwest::Client::new(),
            Some("http://127.0.0.1:3000/".to_string()),
        );
        assert_eq!(transport.origin(), Some("http://127.0.0.1:3000"));
        assert_eq!(
            transport.absolute_url("/api/login").unwrap(),
            "http://127.0.0.1:3000/api/login"
        );
    }

    #[test]
    fn test_absolute_url_is_left_alone() {
        let transport = ReqwestTransport::with_client(reqwest::Client::new(), None);
        assert_eq!(
            transport.absolute_url("https://host/api/login").unwrap(),
            "https://host/api/login"
        );
    }

    #[test]
    fn test_relative_url_without_origin_fails() {
        let transport = ReqwestTransport::with_client(reqwest::Client::new(), None);
        assert!(matches!(
            transport.absolute_url("/login"),
            Err(ApiError::MissingOrigin { url }) if url == "/login"
        ));
    }
}
