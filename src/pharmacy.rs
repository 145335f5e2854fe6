//! Nearby-pharmacy lookup over the Overpass (OpenStreetMap) API.
//!
//! Geolocation acquisition and map rendering belong to the host shell; this
//! module only builds the query, calls the service, and shapes the result.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Search radius used when the caller does not pass one.
pub const DEFAULT_RADIUS_M: u32 = 1000;

/// Display name for map nodes without a name tag.
const FALLBACK_NAME: &str = "Pharmacy";

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Overpass connection failed: {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Overpass returned status {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Response parsing failed: {0}")]
    ResponseParsing(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pharmacy {
    /// OpenStreetMap node id.
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// HTTP client for the Overpass API.
pub struct OverpassClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Public Overpass instance with the default timeout.
    pub fn default_public() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS)
    }

    /// Pharmacies within `radius_m` meters of the given coordinate.
    pub fn nearby_pharmacies(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
    ) -> Result<Vec<Pharmacy>, LookupError> {
        let query = overpass_query(lat, lon, radius_m);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("data", query.as_str())])
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    LookupError::Connection(self.endpoint.clone())
                } else if e.is_timeout() {
                    LookupError::HttpClient("Request timed out".into())
                } else {
                    LookupError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LookupError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .map_err(|e| LookupError::ResponseParsing(e.to_string()))?;
        parse_overpass_response(&body)
    }
}

/// Driving-directions deep link for the host shell to open.
pub fn directions_url(lat: f64, lon: f64) -> String {
    format!("https://www.google.com/maps/dir/?api=1&destination={lat},{lon}&travelmode=driving")
}

fn overpass_query(lat: f64, lon: f64, radius_m: u32) -> String {
    format!("[out:json];node[amenity=pharmacy](around:{radius_m},{lat},{lon});out;")
}

// ── Response shape ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Deserialize)]
struct OverpassElement {
    id: i64,
    lat: f64,
    lon: f64,
    #[serde(default)]
    tags: HashMap<String, String>,
}

fn parse_overpass_response(body: &str) -> Result<Vec<Pharmacy>, LookupError> {
    let parsed: OverpassResponse =
        serde_json::from_str(body).map_err(|e| LookupError::ResponseParsing(e.to_string()))?;

    Ok(parsed
        .elements
        .into_iter()
        .map(|el| Pharmacy {
            id: el.id.to_string(),
            name: el
                .tags
                .get("name")
                .cloned()
                .unwrap_or_else(|| FALLBACK_NAME.to_string()),
            lat: el.lat,
            lon: el.lon,
        })
        .collect())
}
