//! Mapping from a matched [`Candidate`] to the enrichment fields.
//!
//! Nothing here fails: missing hours, categories or links simply leave the
//! corresponding field empty.

use crate::leads::{Candidate, DayTime, Enrichment, OpeningHours, Period};

const SUNDAY: u8 = 0;
const SATURDAY: u8 = 6;

/// Closing time of the first weekday (Monday through Friday, in order) that
/// lists a close, formatted `HH:MM`.
#[must_use]
pub fn closing_time(hours: &OpeningHours) -> Option<String> {
    (1..=5).find_map(|day| {
        hours
            .periods
            .iter()
            .filter(|p| p.open.day == day)
            .find_map(|p| p.close)
            .map(|close| format!("{:02}:{:02}", close.hour, close.minute))
    })
}

/// `true` if any period opens on Saturday or Sunday.
#[must_use]
pub fn weekend_open(hours: &OpeningHours) -> bool {
    hours
        .periods
        .iter()
        .any(|p| p.open.day == SATURDAY || p.open.day == SUNDAY)
}

/// `true` when the hours describe a place that never closes.
///
/// Accepts the places convention of a single open-ended period starting at
/// midnight, as well as an explicit midnight-to-midnight period on all seven
/// days (closing either at 23:59 the same day or 00:00 the next).
#[must_use]
pub fn is_open_24_hours(hours: &OpeningHours) -> bool {
    let never_closes = hours
        .periods
        .iter()
        .any(|p| p.close.is_none() && p.open.hour == 0 && p.open.minute == 0);
    if never_closes {
        return true;
    }

    (SUNDAY..=SATURDAY).all(|day| hours.periods.iter().any(|p| covers_whole_day(p, day)))
}

fn covers_whole_day(period: &Period, day: u8) -> bool {
    if period.open != DayTime::new(day, 0, 0) {
        return false;
    }
    match period.close {
        Some(close) => {
            close == DayTime::new(day, 23, 59) || close == DayTime::new((day + 1) % 7, 0, 0)
        }
        None => true,
    }
}

/// Whether the place is trading. An unknown status counts as operational.
#[must_use]
pub fn is_operational(candidate: &Candidate) -> bool {
    candidate
        .business_status
        .as_deref()
        .is_none_or(|status| status.is_empty() || status == "OPERATIONAL")
}

/// Builds the lead-side enrichment for a matched candidate.
///
/// The competitor fields are left empty; the competitor lookup fills them.
/// When the candidate carries no maps link, one is derived from its place id.
#[must_use]
pub fn enrichment_for(candidate: &Candidate) -> Enrichment {
    let (closing, weekend) = match &candidate.opening_hours {
        Some(hours) if !hours.periods.is_empty() => {
            (closing_time(hours), Some(weekend_open(hours)))
        }
        _ => (None, None),
    };

    Enrichment {
        maps_link: maps_link_for(candidate),
        closing_time: closing,
        weekend_open: weekend,
        category: candidate.category.clone().filter(|c| !c.is_empty()),
        competitor_name: None,
        competitor_maps_link: None,
    }
}

/// Maps link for a candidate, falling back to a place-id URL.
#[must_use]
pub fn maps_link_for(candidate: &Candidate) -> Option<String> {
    candidate
        .maps_link
        .clone()
        .filter(|link| !link.is_empty())
        .or_else(|| fallback_maps_link(&candidate.place_id))
}

fn fallback_maps_link(place_id: &str) -> Option<String> {
    if place_id.is_empty() {
        None
    } else {
        Some(format!(
            "https://www.google.com/maps/place/?q=place_id:{place_id}"
        ))
    }
}
