use serde::Deserialize;
use shared::api_base::CandidateBases;

/// Construction-time settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Page-declared API base, tried before the conventional prefix.
    pub base_override: Option<String>,
    /// Scheme, host and port that relative bases are resolved against.
    /// Not needed when the transport is the browser's own `fetch`.
    pub origin: Option<String>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_override(mut self, base: impl Into<String>) -> Self {
        self.base_override = Some(base.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn candidates(&self) -> CandidateBases {
        CandidateBases::from_override(self.base_override.as_deref())
    }
}

#[cfg(target_arch = "wasm32")]
impl ClientConfig {
    /// Reads the override from `<meta name="api-base-url">` and the origin
    /// from the current location. Both are optional.
    pub fn from_document() -> Self {
        use shared::constants::API_BASE_META_NAME;

        let Some(window) = web_sys::window() else {
            return Self::default();
        };

        let base_override = window
            .document()
            .and_then(|document| {
                document
                    .query_selector(&format!("meta[name=\"{}\"]", API_BASE_META_NAME))
                    .ok()
                    .flatten()
            })
            .and_then(|meta| meta.get_attribute("content"))
            .filter(|content| !content.is_empty());

        let origin = window.location().origin().ok();

        Self { base_override, origin }
    }
}
