use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
pub enum ServerConfigError {
    #[error("invalid BIND_ADDR `{value}`")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("frontend directory `{}` does not exist", .0.display())]
    MissingFrontendDir(PathBuf),
}

/// Dev server settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding the HTML pages and `static/` assets.
    pub frontend_dir: PathBuf,
    /// Advertised to pages through `<meta name="api-base-url">`.
    pub api_base_url: Option<String>,
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `FRONTEND_DIR` and `API_BASE_URL`.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerConfigError> {
        let bind_value = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|source| ServerConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let frontend_dir = match lookup("FRONTEND_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => ["frontend", "../frontend"]
                .iter()
                .map(PathBuf::from)
                .find(|dir| dir.is_dir())
                .unwrap_or_else(|| PathBuf::from("frontend")),
        };

        if !frontend_dir.is_dir() {
            return Err(ServerConfigError::MissingFrontendDir(frontend_dir));
        }

        let api_base_url = lookup("API_BASE_URL").filter(|value| !value.trim().is_empty());

        Ok(Self {
            bind_addr,
            frontend_dir,
            api_base_url,
        })
    }
}
