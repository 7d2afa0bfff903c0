//! Company-name cleanup and search-query construction.

use std::sync::LazyLock;

use regex::Regex;

static BUSINESS_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[\s,]*\b(LLC|Inc|Corporation|Corp|Ltd|Limited|Co|Company|Group|Holdings|Services)\.?\s*$",
    )
    .expect("valid regex")
});
static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// Strips a trailing legal/business suffix and punctuation from a company
/// name so the places search sees only the distinctive part.
///
/// Only one trailing suffix is removed (`"Acme Group LLC"` becomes
/// `"Acme Group"`). If cleaning would leave nothing, the trimmed input is
/// returned unchanged.
#[must_use]
pub fn clean_company_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_suffix = BUSINESS_SUFFIX_RE.replace(trimmed, "");
    let without_punct = PUNCTUATION_RE.replace_all(&without_suffix, " ");
    let cleaned = without_punct.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        trimmed.to_string()
    } else {
        cleaned
    }
}

/// Joins the non-empty parts of a lead search query with single spaces.
#[must_use]
pub fn build_search_query(company: &str, location: Option<&str>, region: &str) -> String {
    [Some(company), location, Some(region)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
