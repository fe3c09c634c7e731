//! HTTP client for the dashboard REST API
//!
//! The endpoints are an external, fixed contract; this module wraps them
//! behind the [`GoldApi`] trait so components can be driven against a mock
//! in tests. Transport failures surface as `Err`; application-level
//! failures (`success: false`) come back as well-formed responses and are
//! interpreted by the calling component.

pub mod models;

use std::path::Path;

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::error::{GoldtrackError, Result};

use models::{
    AckResponse, CurrentPriceResponse, HealthResponse, HistoricalPriceResponse, ImportResponse,
    NewPurchase, PurchasesResponse,
};

/// Upload progress callback: (bytes sent so far, total bytes)
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send + Sync>;

/// CSV export payload as served by `GET /api/export`
#[derive(Debug, Clone)]
pub struct ExportPayload {
    /// File name suggested by the server's attachment disposition, if any
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait GoldApi: Send + Sync {
    async fn current_price(&self, force_refresh: bool) -> Result<CurrentPriceResponse>;
    async fn historical_price(&self, date: &str) -> Result<HistoricalPriceResponse>;
    async fn purchases(&self, force_refresh: bool) -> Result<PurchasesResponse>;
    async fn add_purchase(&self, purchase: &NewPurchase) -> Result<AckResponse>;
    async fn delete_purchase(&self, id: &str) -> Result<AckResponse>;
    /// Multipart upload of a CSV file; `progress` is invoked as request
    /// body chunks are handed to the transport.
    async fn import_csv(&self, path: &Path, progress: ProgressFn) -> Result<ImportResponse>;
    async fn export_csv(&self) -> Result<ExportPayload>;
    async fn health(&self) -> Result<HealthResponse>;
}

/// reqwest-backed implementation of [`GoldApi`]
#[derive(Debug, Clone)]
pub struct HttpGoldApi {
    client: Client,
    base_url: String,
}

/// Upload body chunk size; small enough to produce several progress ticks
/// for typical import files.
const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

impl HttpGoldApi {
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("goldtrack/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl GoldApi for HttpGoldApi {
    async fn current_price(&self, force_refresh: bool) -> Result<CurrentPriceResponse> {
        debug!("Fetching current price (refresh={})", force_refresh);

        let response = self
            .client
            .get(self.url("/api/current-price"))
            .query(&[("refresh", force_refresh)])
            .send()
            .await
            .context("Failed to request current price")?;

        response
            .json()
            .await
            .context("Failed to parse current price response")
    }

    async fn historical_price(&self, date: &str) -> Result<HistoricalPriceResponse> {
        debug!("Fetching historical price for {}", date);

        let response = self
            .client
            .get(self.url("/api/historical-price"))
            .query(&[("date", date)])
            .send()
            .await
            .context("Failed to request historical price")?;

        response
            .json()
            .await
            .context("Failed to parse historical price response")
    }

    async fn purchases(&self, force_refresh: bool) -> Result<PurchasesResponse> {
        debug!("Fetching purchases (refresh={})", force_refresh);

        let response = self
            .client
            .get(self.url("/api/purchases"))
            .query(&[("refresh", force_refresh)])
            .send()
            .await
            .context("Failed to request purchases")?;

        response
            .json()
            .await
            .context("Failed to parse purchases response")
    }

    async fn add_purchase(&self, purchase: &NewPurchase) -> Result<AckResponse> {
        info!(
            "Adding purchase: {}g at {} SAR/g",
            purchase.grams, purchase.purchase_price
        );

        let response = self
            .client
            .post(self.url("/api/purchases"))
            .json(purchase)
            .send()
            .await
            .context("Failed to submit purchase")?;

        response
            .json()
            .await
            .context("Failed to parse add purchase response")
    }

    async fn delete_purchase(&self, id: &str) -> Result<AckResponse> {
        info!("Deleting purchase {}", id);

        let response = self
            .client
            .delete(self.url(&format!("/api/purchases/{}", id)))
            .send()
            .await
            .context("Failed to submit delete request")?;

        response
            .json()
            .await
            .context("Failed to parse delete response")
    }

    async fn import_csv(&self, path: &Path, progress: ProgressFn) -> Result<ImportResponse> {
        info!("Uploading {} for import", path.display());

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let total = bytes.len() as u64;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "import.csv".to_string());

        // Stream the body in chunks so the transport pulls them one at a
        // time, ticking the progress callback proportionally to loaded/total.
        let chunks: Vec<Vec<u8>> = bytes
            .chunks(UPLOAD_CHUNK_BYTES)
            .map(|c| c.to_vec())
            .collect();
        let mut sent = 0u64;
        let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            progress(sent, total);
            Ok::<_, std::io::Error>(chunk)
        }));

        let part = reqwest::multipart::Part::stream_with_length(
            reqwest::Body::wrap_stream(stream),
            total,
        )
        .file_name(file_name)
        .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/import"))
            .multipart(form)
            .send()
            .await
            .context("Network error occurred during upload")?;

        // Only HTTP 200 counts as a completed upload; any other status is a
        // failed user action, not a result to summarize.
        if response.status() != StatusCode::OK {
            return Err(GoldtrackError::ApiError(format!(
                "server returned status {}",
                response.status()
            ))
            .into());
        }

        response
            .json()
            .await
            .context("Failed to parse import response")
    }

    async fn export_csv(&self) -> Result<ExportPayload> {
        info!("Requesting CSV export");

        let response = self
            .client
            .get(self.url("/api/export"))
            .send()
            .await
            .context("Failed to request export")?;

        // The server answers a JSON envelope instead of an attachment when
        // there is nothing to export.
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if content_type.starts_with("application/json") {
            let ack: AckResponse = response
                .json()
                .await
                .context("Failed to parse export response")?;
            bail!(
                "{}",
                ack.message.unwrap_or_else(|| "Export failed".to_string())
            );
        }

        let file_name = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_attachment_filename);

        let bytes = response
            .bytes()
            .await
            .context("Failed to download export")?
            .to_vec();

        Ok(ExportPayload { file_name, bytes })
    }

    async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .context("Failed to request health check")?;

        response
            .json()
            .await
            .context("Failed to parse health response")
    }
}

/// Extract the filename from a `Content-Disposition: attachment` header
fn parse_attachment_filename(value: &str) -> Option<String> {
    let name = value.split("filename=").nth(1)?;
    let name = name.split(';').next()?.trim().trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
