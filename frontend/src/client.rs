use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info, warn};
use shared::api_base::{join_path, CandidateBases};
use shared::constants::{NOT_FOUND_STATUS, ROOT_BASE};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::options::RequestOptions;
use crate::transport::{ApiResponse, ReqwestTransport, Transport};

const UNRESOLVED: usize = usize::MAX;

/// API client that discovers which base URL the backend is mounted under.
///
/// Each request walks the candidate bases, starting with the one that last
/// produced an accepted response. A 404 from a non-empty base means "wrong
/// mount point" and moves on to the next candidate; every other response is
/// accepted and remembered.
#[derive(Debug)]
pub struct ApiClient<T = ReqwestTransport> {
    transport: T,
    candidates: CandidateBases,
    // Index into `candidates`; `UNRESOLVED` until the first accepted response.
    resolved: AtomicUsize,
}

impl ApiClient<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config.origin.clone())?;
        Ok(Self::with_transport(config.candidates(), transport))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(candidates: CandidateBases, transport: T) -> Self {
        Self {
            transport,
            candidates,
            resolved: AtomicUsize::new(UNRESOLVED),
        }
    }

    pub fn candidates(&self) -> &CandidateBases {
        &self.candidates
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The base that last produced an accepted response, if any.
    pub fn resolved_base(&self) -> Option<&str> {
        self.resolved_index().and_then(|index| self.candidates.get(index))
    }

    /// Best-known base: the resolved one, else the first candidate.
    pub fn current_base(&self) -> &str {
        self.resolved_base()
            .or_else(|| self.candidates.first())
            .unwrap_or(ROOT_BASE)
    }

    /// Issues `path` against the resolved base, falling back through the
    /// remaining candidates.
    ///
    /// HTTP statuses are never errors here. Only when every candidate tried
    /// fails at the network level is the last such error returned.
    pub async fn request(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T::Response, T::Error> {
        let mut last_error = None;

        for index in self.candidates.try_order(self.resolved_index()) {
            let base = &self.candidates[index];
            let url = join_path(base, path);

            match self.transport.fetch(&url, options).await {
                Ok(response) => {
                    if response.status() == NOT_FOUND_STATUS && !base.is_empty() {
                        debug!("{} returned 404, trying next API base", url);
                        continue;
                    }

                    self.remember(index);
                    return Ok(response);
                }
                Err(err) => {
                    warn!("Request to {} failed: {}", url, err);
                    last_error = Some(err);
                }
            }
        }

        if let Some(err) = last_error {
            return Err(err);
        }

        self.transport
            .fetch(&join_path(ROOT_BASE, path), options)
            .await
    }

    fn resolved_index(&self) -> Option<usize> {
        match self.resolved.load(Ordering::Acquire) {
            UNRESOLVED => None,
            index => Some(index),
        }
    }

    fn remember(&self, index: usize) {
        let previous = self.resolved.swap(index, Ordering::AcqRel);
        if previous != index {
            info!("Using API base {:?}", &self.candidates[index]);
        }
    }
}
