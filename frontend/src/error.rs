/// Failure of a single request against one candidate base.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure (DNS, connection refused, TLS, etc).
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// A relative URL was requested but no origin was configured to
    /// resolve it against.
    #[error("cannot resolve relative URL `{url}` without an origin")]
    MissingOrigin { url: String },

    /// Header name or value supplied as text is not valid HTTP.
    #[error("invalid header `{name}`")]
    InvalidHeader { name: String },

    /// Method supplied as text is not a valid HTTP token.
    #[error("invalid HTTP method `{method}`")]
    InvalidMethod { method: String },

    /// A header value cannot be handed to a transport that only takes
    /// visible-ASCII strings.
    #[error("header `{name}` is not a valid string value")]
    InvalidHeaderValue { name: String },

    /// Request body could not be encoded.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Failure reported by the browser's `fetch`.
    #[cfg(target_arch = "wasm32")]
    #[error("fetch failed")]
    Fetch(#[from] gloo_net::Error),
}
