use std::time::Duration;

use futures_util::StreamExt;
use jobboard_logging::{jb_debug, jb_info, jb_warn};
use serde_json::Value;
use url::Url;

use crate::payload::decode_results;
use crate::{FailureKind, FetchError};

pub const DEFAULT_ENDPOINT: &str = "https://testapi.getlokalapp.com/common/jobs";

/// Characters of an error body quoted in an HTTP failure message.
const ERROR_BODY_PREVIEW: usize = 100;
/// Enough bytes for `ERROR_BODY_PREVIEW` characters of any UTF-8 text.
const ERROR_BODY_PREVIEW_BYTES: u64 = 4 * ERROR_BODY_PREVIEW as u64;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    /// `None` leaves the HTTP client's default in place.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves the HTTP client's default in place.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl FetchSettings {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

/// Source of raw job pages.
#[async_trait::async_trait]
pub trait JobsClient: Send + Sync {
    /// Fetches page `page` and returns its unfiltered `results` items.
    async fn fetch_page(&self, page: u32) -> Result<Vec<Value>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobsClient {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestJobsClient {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    /// Reads at most the bytes needed to quote an error body, never more than
    /// `max_bytes`. Transport errors while reading just shorten the preview.
    async fn read_error_preview(&self, response: reqwest::Response) -> String {
        let cap = ERROR_BODY_PREVIEW_BYTES.min(self.settings.max_bytes) as usize;
        let mut bytes = Vec::with_capacity(cap);
        let mut stream = response.bytes_stream();
        while bytes.len() < cap {
            match stream.next().await {
                Some(Ok(chunk)) => {
                    let take = chunk.len().min(cap - bytes.len());
                    bytes.extend_from_slice(&chunk[..take]);
                }
                Some(Err(err)) => {
                    jb_debug!("Error body read stopped early: {}", err);
                    break;
                }
                None => break,
            }
        }
        String::from_utf8_lossy(&bytes)
            .chars()
            .take(ERROR_BODY_PREVIEW)
            .collect()
    }
}

#[async_trait::async_trait]
impl JobsClient for ReqwestJobsClient {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Value>, FetchError> {
        let url = page_url(&self.settings.endpoint, page)?;
        jb_debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        jb_info!("Jobs page {} answered with status {}", page, status.as_u16());
        if !status.is_success() {
            let preview = self.read_error_preview(response).await;
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("HTTP error! Status: {}, Body: {}", status.as_u16(), preview),
            ));
        }

        let body = self.read_body(response).await?;
        let items = decode_results(&body).inspect_err(|err| {
            jb_warn!("Jobs page {} had an unexpected payload: {}", page, err);
        })?;
        Ok(items)
    }
}

/// Builds `<endpoint>?page=<page>`, replacing any `page` already present.
pub fn page_url(endpoint: &str, page: u32) -> Result<Url, FetchError> {
    let mut url = Url::parse(endpoint)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{endpoint}: {err}")))?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (key, value) in &kept {
            query.append_pair(key, value);
        }
        query.append_pair("page", &page.to_string());
    }
    Ok(url)
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> FetchError {
    let kind = FailureKind::TooLarge { max_bytes, actual };
    let message = format!("Response rejected: {kind}");
    FetchError::new(kind, message)
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
