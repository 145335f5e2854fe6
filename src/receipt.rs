//! Receipt OCR client — sends a photographed store receipt to the
//! check-recognition service and returns its line items, so a purchase can be
//! turned into medicine entries without retyping.
//!
//! The service reports prices in kopecks; they are converted to rubles here.
//! Callers treat every error as "no recognized items".

use reqwest::blocking::multipart;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "https://proverkacheka.com/api/v1/check/get";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Receipt service connection failed: {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Receipt service returned status {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Response parsing failed: {0}")]
    ResponseParsing(String),

    #[error("Receipt could not be recognized")]
    Unrecognized,
}

/// One recognized purchase line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: f64,
    /// Rubles.
    pub price: f64,
}

/// HTTP client for the receipt-recognition service.
pub struct ReceiptClient {
    endpoint: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl ReceiptClient {
    pub fn new(endpoint: &str, token: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        }
    }

    /// Public service endpoint with the default timeout.
    pub fn with_token(token: &str) -> Self {
        Self::new(DEFAULT_ENDPOINT, token, DEFAULT_TIMEOUT_SECS)
    }

    /// Uploads a receipt photo and returns the recognized line items.
    pub fn recognize(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<Vec<ReceiptItem>, ReceiptError> {
        let part = multipart::Part::bytes(image)
            .file_name(filename.to_string())
            .mime_str("image/jpeg")
            .map_err(|e| ReceiptError::HttpClient(e.to_string()))?;
        let form = multipart::Form::new()
            .text("token", self.token.clone())
            .part("qrfile", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ReceiptError::Connection(self.endpoint.clone())
                } else if e.is_timeout() {
                    ReceiptError::HttpClient("Request timed out".into())
                } else {
                    ReceiptError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ReceiptError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .map_err(|e| ReceiptError::ResponseParsing(e.to_string()))?;
        parse_check_response(&body)
    }
}

// ── Response shape ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CheckResponse {
    data: Option<CheckData>,
}

#[derive(Deserialize)]
struct CheckData {
    json: Option<CheckJson>,
}

#[derive(Deserialize)]
struct CheckJson {
    #[serde(default)]
    items: Vec<CheckItem>,
}

#[derive(Deserialize)]
struct CheckItem {
    name: String,
    #[serde(default)]
    quantity: f64,
    /// Kopecks.
    #[serde(default)]
    price: i64,
}

fn parse_check_response(body: &str) -> Result<Vec<ReceiptItem>, ReceiptError> {
    let parsed: CheckResponse =
        serde_json::from_str(body).map_err(|e| ReceiptError::ResponseParsing(e.to_string()))?;

    let items = parsed
        .data
        .and_then(|d| d.json)
        .map(|j| j.items)
        .unwrap_or_default();
    if items.is_empty() {
        return Err(ReceiptError::Unrecognized);
    }

    Ok(items
        .into_iter()
        .map(|item| ReceiptItem {
            name: item.name,
            quantity: item.quantity,
            price: item.price as f64 / 100.0,
        })
        .collect())
}
