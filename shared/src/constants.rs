/// `name` of the `<meta>` tag that carries a page-level API base override.
pub const API_BASE_META_NAME: &str = "api-base-url";

/// Conventional mount point of the backend API.
pub const CONVENTIONAL_API_PREFIX: &str = "/api";

/// Same origin, no prefix. Always the last candidate.
pub const ROOT_BASE: &str = "";

pub const NOT_FOUND_STATUS: u16 = 404;

pub const HEALTH_CHECK_ENDPOINT: &str = "/health_check";
