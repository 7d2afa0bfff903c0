//! Places API (New) request and response types.
//!
//! Only the fields requested through the client's field mask are modelled.
//! Every response field is optional: the API omits anything a place does
//! not have, and returns `{}` when a search finds nothing.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// places:searchText request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextBody<'a> {
    pub text_query: &'a str,
    pub page_size: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_bias: Option<LocationBias>,
}

#[derive(Debug, Serialize)]
pub struct LocationBias {
    pub circle: Circle,
}

#[derive(Debug, Serialize)]
pub struct Circle {
    pub center: LatLngLiteral,
    /// Radius in meters.
    pub radius: f64,
}

// ---------------------------------------------------------------------------
// places:searchText response
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

/// One place as returned by `places:searchText`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub website_uri: Option<String>,
    #[serde(default)]
    pub google_maps_uri: Option<String>,
    #[serde(default)]
    pub primary_type: Option<String>,
    #[serde(default)]
    pub primary_type_display_name: Option<LocalizedText>,
    #[serde(default)]
    pub regular_opening_hours: Option<RegularOpeningHours>,
    #[serde(default)]
    pub location: Option<LatLngLiteral>,
    #[serde(default)]
    pub business_status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularOpeningHours {
    #[serde(default)]
    pub periods: Vec<HoursPeriod>,
}

#[derive(Debug, Deserialize)]
pub struct HoursPeriod {
    pub open: HoursPoint,
    #[serde(default)]
    pub close: Option<HoursPoint>,
}

/// A point in the week: `day` is 0 = Sunday through 6 = Saturday.
#[derive(Debug, Deserialize)]
pub struct HoursPoint {
    pub day: u8,
    #[serde(default)]
    pub hour: u8,
    #[serde(default)]
    pub minute: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLngLiteral {
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// Google's standard error body: `{ "error": { "code", "message", "status" } }`.
/// Only `message` and `status` are read.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
