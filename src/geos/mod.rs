// src/geos/mod.rs
//
// Thin wrapper over the mapping service's web endpoints. The service is an
// opaque collaborator: it returns coordinates/suggestions or a recoverable
// error, and nothing in the wizard depends on it succeeding.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::Duration;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const AUTOCOMPLETE_URL: &str = "https://maps.googleapis.com/maps/api/place/autocomplete/json";

#[derive(Debug)]
pub enum GeoError {
    Config(String),
    Network(String),
    Api(String),
    NoResults,
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::Config(msg) => write!(f, "Configuration error: {msg}"),
            GeoError::Network(msg) => write!(f, "Network error: {msg}"),
            GeoError::Api(msg) => write!(f, "Mapping API error: {msg}"),
            GeoError::NoResults => write!(f, "No results for that address"),
        }
    }
}

impl Error for GeoError {}

/// A resolved address with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub formatted_address: String,
    pub place_id: String,
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressSuggestion {
    pub description: String,
    pub place_id: String,
}

// Wire shapes for the service's JSON.

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    place_id: String,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
struct Prediction {
    description: String,
    place_id: String,
}

pub struct GeoClient {
    client: Client,
    api_key: String,
}

impl GeoClient {
    /// Reads the API key from the environment; no key means the address
    /// lookup features are simply unavailable, manual entry still works.
    pub fn from_env() -> Result<Self, GeoError> {
        let api_key = std::env::var("GOOGLE_MAPS_API_KEY")
            .map_err(|_| GeoError::Config("GOOGLE_MAPS_API_KEY environment variable not set".into()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GeoError::Network(e.to_string()))?;

        Ok(Self { client, api_key })
    }

    /// Resolves an address to coordinates, restricted to Canada.
    pub fn geocode(&self, address: &str) -> Result<GeoPoint, GeoError> {
        let body = self
            .client
            .get(GEOCODE_URL)
            .query(&[
                ("address", address),
                ("region", "ca"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| GeoError::Network(e.to_string()))?
            .text()
            .map_err(|e| GeoError::Network(e.to_string()))?;

        parse_geocode_response(&body)
    }

    /// Address suggestions for a partial input, restricted to Canada.
    pub fn autocomplete(&self, input: &str) -> Result<Vec<AddressSuggestion>, GeoError> {
        let body = self
            .client
            .get(AUTOCOMPLETE_URL)
            .query(&[
                ("input", input),
                ("components", "country:ca"),
                ("types", "address"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| GeoError::Network(e.to_string()))?
            .text()
            .map_err(|e| GeoError::Network(e.to_string()))?;

        parse_autocomplete_response(&body)
    }
}

/// Pure response mapping, kept apart from the transport so tests cover it
/// without a network.
pub fn parse_geocode_response(body: &str) -> Result<GeoPoint, GeoError> {
    let response: GeocodeResponse =
        serde_json::from_str(body).map_err(|e| GeoError::Api(format!("bad response: {e}")))?;

    match response.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Err(GeoError::NoResults),
        other => return Err(GeoError::Api(format!("status {other}"))),
    }

    let first = response.results.into_iter().next().ok_or(GeoError::NoResults)?;
    Ok(GeoPoint {
        lat: first.geometry.location.lat,
        lng: first.geometry.location.lng,
        formatted_address: first.formatted_address,
        place_id: first.place_id,
    })
}

pub fn parse_autocomplete_response(body: &str) -> Result<Vec<AddressSuggestion>, GeoError> {
    let response: AutocompleteResponse =
        serde_json::from_str(body).map_err(|e| GeoError::Api(format!("bad response: {e}")))?;

    match response.status.as_str() {
        "OK" | "ZERO_RESULTS" => {}
        other => return Err(GeoError::Api(format!("status {other}"))),
    }

    Ok(response
        .predictions
        .into_iter()
        .map(|p| AddressSuggestion {
            description: p.description,
            place_id: p.place_id,
        })
        .collect())
}
