use std::time::Duration;

use engine_logging::{engine_debug, engine_trace};
use futures_util::StreamExt;
use harvester_core::{CdxQuery, RawRow};
use reqwest::header::USER_AGENT;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// How long a single read may stay idle. Slow but steady bodies are not cut off.
    pub read_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://web.archive.org/cdx/search/cdx".to_string(),
            user_agent: "wayback-resume-harvester/1.0".to_string(),
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(120),
            max_bytes: 64 * 1024 * 1024,
        }
    }
}

impl FetchSettings {
    /// Room allowed per requested record when sizing `max_bytes`.
    pub const BYTES_PER_RECORD: u64 = 16 * 1024;

    /// Raise `max_bytes` so a full page of `page_size` records always fits.
    pub fn sized_for_page(mut self, page_size: u32) -> Self {
        self.max_bytes = self
            .max_bytes
            .max(u64::from(page_size) * Self::BYTES_PER_RECORD);
        self
    }
}

/// Source of CDX pages: one GET, JSON decoded into rows.
#[async_trait::async_trait]
pub trait IndexClient: Send + Sync {
    async fn fetch_page(&self, query: &CdxQuery) -> Result<Vec<RawRow>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestIndexClient {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestIndexClient {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        // Validate the endpoint up front rather than on every page.
        reqwest::Url::parse(&settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.read_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { settings, client })
    }

    fn request_url(&self, query: &CdxQuery) -> Result<reqwest::Url, FetchError> {
        let mut url = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.query_pairs_mut().extend_pairs(query.params());
        Ok(url)
    }
}

#[async_trait::async_trait]
impl IndexClient for ReqwestIndexClient {
    async fn fetch_page(&self, query: &CdxQuery) -> Result<Vec<RawRow>, FetchError> {
        let url = self.request_url(query)?;
        engine_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            engine_trace!("chunk of {} bytes", chunk.len());
            bytes.extend_from_slice(&chunk);
        }
        engine_debug!("received {} bytes", bytes.len());

        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    // A host that never accepts the connection is not worth waiting on.
    if err.is_connect() {
        return FetchError::new(FailureKind::Network, err.to_string());
    }
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
