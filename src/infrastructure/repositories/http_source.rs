// src/infrastructure/repositories/http_source.rs
use crate::domain::error::DomainResult;
use crate::domain::payload::BookmarkPayload;
use crate::domain::repositories::bookmark_source::BookmarkSource;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::json::parse_payload;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Bookmark payload served over HTTP, e.g. `https://host/api/data`.
#[derive(Debug)]
pub struct HttpSource {
    url: Url,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout_ms: u64) -> DomainResult<Self> {
        let url = Url::parse(url).map_err(|e| {
            InfrastructureError::InvalidLocation(format!("'{}': {}", url, e)).at(url)
        })?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| InfrastructureError::from(e).at(url.as_str()))?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl BookmarkSource for HttpSource {
    #[instrument(level = "debug", skip(self), fields(url = %self.url))]
    fn fetch(&self) -> DomainResult<BookmarkPayload> {
        let start = Instant::now();
        let body = self
            .client
            .get(self.url.clone())
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| InfrastructureError::from(e).at(self.describe()))?;
        debug!(
            "Fetched {} bytes in {} ms",
            body.len(),
            start.elapsed().as_millis()
        );

        parse_payload(&body).map_err(|e| e.context(self.describe()))
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }

    fn is_available(&self) -> bool {
        match self.client.head(self.url.clone()).send() {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("HEAD {} failed: {}", self.url, e);
                false
            }
        }
    }
}
