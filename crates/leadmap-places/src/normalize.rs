//! Conversion from raw Places API shapes to [`leadmap_core::Candidate`].

use leadmap_core::{Candidate, DayTime, LatLng, OpeningHours, Period};

use crate::types::{HoursPoint, Place, RegularOpeningHours};

/// Normalizes a raw [`Place`] into a [`Candidate`].
///
/// Empty strings are treated as absent. The category prefers the localized
/// display name (`"Bakery"`) over the raw type tag (`"bakery"`). Opening
/// hours with no periods are dropped.
#[must_use]
pub fn normalize_place(place: Place) -> Candidate {
    let category = place
        .primary_type_display_name
        .map(|t| t.text)
        .filter(|s| !s.is_empty())
        .or_else(|| place.primary_type.filter(|s| !s.is_empty()));

    Candidate {
        place_id: place.id,
        name: place.display_name.map(|t| t.text).unwrap_or_default(),
        website: place.website_uri.filter(|s| !s.trim().is_empty()),
        maps_link: place.google_maps_uri.filter(|s| !s.trim().is_empty()),
        opening_hours: place.regular_opening_hours.and_then(normalize_hours),
        category,
        location: place.location.map(|l| LatLng {
            latitude: l.latitude,
            longitude: l.longitude,
        }),
        business_status: place.business_status.filter(|s| !s.trim().is_empty()),
    }
}

fn normalize_hours(hours: RegularOpeningHours) -> Option<OpeningHours> {
    if hours.periods.is_empty() {
        return None;
    }
    let periods = hours
        .periods
        .into_iter()
        .map(|p| Period {
            open: day_time(&p.open),
            close: p.close.as_ref().map(day_time),
        })
        .collect();
    Some(OpeningHours { periods })
}

fn day_time(point: &HoursPoint) -> DayTime {
    DayTime::new(point.day, point.hour, point.minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_from(json: serde_json::Value) -> Place {
        serde_json::from_value(json).expect("fixture should deserialize")
    }

    #[test]
    fn normalizes_full_place() {
        let place = place_from(serde_json::json!({
            "id": "ChIJ123",
            "displayName": { "text": "Acme Bakery", "languageCode": "en" },
            "websiteUri": "https://www.acmebakery.com/",
            "googleMapsUri": "https://maps.google.com/?cid=123",
            "primaryType": "bakery",
            "primaryTypeDisplayName": { "text": "Bakery" },
            "location": { "latitude": 30.27, "longitude": -97.74 },
            "businessStatus": "OPERATIONAL",
            "regularOpeningHours": {
                "openNow": true,
                "periods": [
                    { "open": { "day": 1, "hour": 7, "minute": 0 },
                      "close": { "day": 1, "hour": 18, "minute": 0 } }
                ],
                "weekdayDescriptions": ["Monday: 7:00 AM – 6:00 PM"]
            }
        }));

        let candidate = normalize_place(place);
        assert_eq!(candidate.place_id, "ChIJ123");
        assert_eq!(candidate.name, "Acme Bakery");
        assert_eq!(
            candidate.website.as_deref(),
            Some("https://www.acmebakery.com/")
        );
        assert_eq!(candidate.category.as_deref(), Some("Bakery"));
        let hours = candidate.opening_hours.expect("hours should be present");
        assert_eq!(hours.periods.len(), 1);
        assert_eq!(hours.periods[0].open, DayTime::new(1, 7, 0));
        assert_eq!(hours.periods[0].close, Some(DayTime::new(1, 18, 0)));
        let location = candidate.location.expect("location should be present");
        assert!((location.latitude - 30.27).abs() < 1e-9);
        assert_eq!(candidate.business_status.as_deref(), Some("OPERATIONAL"));
    }

    #[test]
    fn category_falls_back_to_primary_type() {
        let place = place_from(serde_json::json!({
            "id": "p1",
            "primaryType": "bakery"
        }));
        assert_eq!(normalize_place(place).category.as_deref(), Some("bakery"));
    }

    #[test]
    fn empty_strings_become_none() {
        let place = place_from(serde_json::json!({
            "id": "p1",
            "websiteUri": "",
            "googleMapsUri": "  ",
            "businessStatus": "",
            "primaryTypeDisplayName": { "text": "" }
        }));
        let candidate = normalize_place(place);
        assert!(candidate.business_status.is_none());
        assert!(candidate.website.is_none());
        assert!(candidate.maps_link.is_none());
        assert!(candidate.category.is_none());
    }

    #[test]
    fn open_ended_period_keeps_missing_close() {
        let place = place_from(serde_json::json!({
            "id": "p24",
            "regularOpeningHours": {
                "periods": [ { "open": { "day": 0, "hour": 0, "minute": 0 } } ]
            }
        }));
        let hours = normalize_place(place).opening_hours.unwrap();
        assert!(hours.periods[0].close.is_none());
        assert!(leadmap_core::is_open_24_hours(&hours));
    }

    #[test]
    fn hours_without_periods_are_dropped() {
        let place = place_from(serde_json::json!({
            "id": "p1",
            "regularOpeningHours": { "openNow": false, "periods": [] }
        }));
        assert!(normalize_place(place).opening_hours.is_none());
    }
}
