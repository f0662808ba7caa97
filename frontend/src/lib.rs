//! Client-side helper that finds the base URL the backend API is mounted
//! under and forwards requests to it.

pub mod client;
pub mod config;
pub mod error;
pub mod options;
pub mod transport;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use options::RequestOptions;
pub use transport::{ApiResponse, ReqwestTransport, Transport};

#[cfg(target_arch = "wasm32")]
pub use transport::BrowserTransport;
