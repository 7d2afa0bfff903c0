//! Website comparison between a lead and a places candidate.
//!
//! Both sides are reduced to a bare host-and-path form and then compared by
//! equality or containment, so `http://Example.com/` matches `example.com`
//! and `acmebakery.com/menu` matches `www.acmebakery.com`.

/// Reduces a user- or API-supplied website to a comparable form.
///
/// Trims whitespace, lower-cases, strips an `http://` or `https://` scheme,
/// a leading `www.` and any trailing slashes. Returns an empty string for
/// blank input.
#[must_use]
pub fn normalize_website(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);
    without_www.trim_end_matches('/').to_string()
}

/// Returns `true` when the candidate's website is judged equivalent to the
/// lead's website.
///
/// An absent candidate website, or either side normalizing to an empty
/// string, never matches.
#[must_use]
pub fn websites_match(lead_website: &str, candidate_website: Option<&str>) -> bool {
    let Some(candidate_website) = candidate_website else {
        return false;
    };

    let lead = normalize_website(lead_website);
    let candidate = normalize_website(candidate_website);
    if lead.is_empty() || candidate.is_empty() {
        return false;
    }

    lead == candidate || lead.contains(&candidate) || candidate.contains(&lead)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_scheme_www_and_trailing_slash() {
        assert_eq!(normalize_website("https://www.Example.com/"), "example.com");
        assert_eq!(normalize_website("HTTP://example.com//"), "example.com");
        assert_eq!(normalize_website("  www.example.com  "), "example.com");
    }

    #[test]
    fn normalize_keeps_path() {
        assert_eq!(
            normalize_website("https://example.com/locations/"),
            "example.com/locations"
        );
    }

    #[test]
    fn normalize_blank_is_empty() {
        assert_eq!(normalize_website("   "), "");
        assert_eq!(normalize_website("https://"), "");
    }

    #[test]
    fn scheme_and_case_differences_match() {
        assert!(websites_match("http://Example.com/", Some("example.com")));
    }

    #[test]
    fn different_domains_do_not_match() {
        assert!(!websites_match("foo.com", Some("bar.com")));
    }

    #[test]
    fn absent_candidate_website_does_not_match() {
        assert!(!websites_match("foo.com", None));
    }

    #[test]
    fn empty_lead_website_never_matches() {
        assert!(!websites_match("", Some("example.com")));
        assert!(!websites_match("  ", Some("example.com")));
    }

    #[test]
    fn empty_candidate_website_never_matches() {
        assert!(!websites_match("example.com", Some("")));
    }

    #[test]
    fn www_prefix_matches_bare_domain() {
        assert!(websites_match("acmebakery.com", Some("www.acmebakery.com")));
    }

    #[test]
    fn containment_in_either_direction_matches() {
        assert!(websites_match(
            "acmebakery.com",
            Some("https://www.acmebakery.com/locations/downtown")
        ));
        assert!(websites_match(
            "https://acmebakery.com/menu",
            Some("acmebakery.com")
        ));
    }
}
