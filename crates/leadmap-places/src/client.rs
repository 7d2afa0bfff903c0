//! HTTP client for the Places API (New) text-search endpoint.
//!
//! Wraps `reqwest` with API key and field-mask headers, Google error-envelope
//! decoding, and normalization of results into [`Candidate`]s. Each call is a
//! single attempt; callers decide what a failure means for their lead.

use std::time::Duration;

use leadmap_core::{Candidate, LatLng};
use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::normalize::normalize_place;
use crate::types::{
    Circle, ErrorEnvelope, LatLngLiteral, LocationBias, SearchTextBody, SearchTextResponse,
};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/";
const SEARCH_TEXT_PATH: &str = "v1/places:searchText";

/// Fields requested from `places:searchText`. The API bills by field tier,
/// so this lists exactly what normalization reads.
pub(crate) const FIELD_MASK: &str = "places.id,places.displayName,places.websiteUri,\
places.googleMapsUri,places.primaryType,places.primaryTypeDisplayName,\
places.regularOpeningHours,places.location,places.businessStatus";

/// Parameters for one text search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    /// Upper bound on returned candidates (the API caps this at 20).
    pub max_results: u8,
    /// Optional circle the search is biased towards: center and radius in meters.
    pub location_bias: Option<(LatLng, f64)>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>, max_results: u8) -> Self {
        Self {
            query: query.into(),
            max_results,
            location_bias: None,
        }
    }

    #[must_use]
    pub fn biased_to(mut self, center: LatLng, radius_meters: f64) -> Self {
        self.location_bias = Some((center, radius_meters));
        self
    }
}

/// Client for the Places API (New).
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs one `places:searchText` request and returns at most
    /// `request.max_results` candidates in API order.
    ///
    /// An empty result set is `Ok(vec![])`, not an error.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Api`] on any non-2xx status (bad key, quota, invalid
    ///   request).
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_text(&self, request: &SearchRequest) -> Result<Vec<Candidate>, PlacesError> {
        let url = self.search_text_url()?;
        let body = SearchTextBody {
            text_query: &request.query,
            page_size: request.max_results,
            location_bias: request.location_bias.map(|(center, radius)| LocationBias {
                circle: Circle {
                    center: LatLngLiteral {
                        latitude: center.latitude,
                        longitude: center.longitude,
                    },
                    radius,
                },
            }),
        };

        tracing::debug!(query = %request.query, page_size = request.max_results, "places text search");

        let response = self
            .client
            .post(url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: Self::error_message(&text),
            });
        }

        let parsed: SearchTextResponse =
            serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
                context: format!("searchText(query={})", request.query),
                source: e,
            })?;

        let candidates: Vec<Candidate> = parsed
            .places
            .into_iter()
            .take(usize::from(request.max_results))
            .map(normalize_place)
            .collect();

        tracing::debug!(query = %request.query, results = candidates.len(), "places text search done");
        Ok(candidates)
    }

    fn search_text_url(&self) -> Result<Url, PlacesError> {
        self.base_url
            .join(SEARCH_TEXT_PATH)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Pulls the human-readable message out of a Google error envelope,
    /// falling back to the raw body.
    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.message.is_empty() => match envelope.error.status {
                Some(status) => format!("{status}: {}", envelope.error.message),
                None => envelope.error.message,
            },
            _ if body.trim().is_empty() => "empty response body".to_string(),
            _ => body.trim().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
