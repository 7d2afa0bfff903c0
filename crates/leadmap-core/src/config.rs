use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Upper bound the Places text-search endpoint accepts for `pageSize`.
const MAX_PAGE_SIZE: u8 = 20;

/// Largest circle radius, in meters, the Places API accepts for location bias.
const MAX_BIAS_RADIUS_METERS: f64 = 50_000.0;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_finite() && value > 0.0 && value <= MAX_BIAS_RADIUS_METERS {
            Ok(value)
        } else {
            Err(invalid(
                var,
                format!("must be greater than 0 and at most {MAX_BIAS_RADIUS_METERS}, got {value}"),
            ))
        }
    };

    let non_blank = |var: &str| lookup(var).ok().filter(|v| !v.trim().is_empty());
    let places_api_key = non_blank("LEADMAP_PLACES_API_KEY")
        .or_else(|| non_blank("GOOGLE_MAPS_API_KEY"))
        .ok_or_else(|| ConfigError::MissingEnvVar("LEADMAP_PLACES_API_KEY".to_string()))?;

    let places_base_url = or_default("LEADMAP_PLACES_BASE_URL", "https://places.googleapis.com");
    let log_level = or_default("LEADMAP_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("LEADMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("LEADMAP_USER_AGENT", "leadmap/0.1 (lead-enrichment)");
    let competitor_radius_meters = parse_f64("LEADMAP_COMPETITOR_RADIUS_METERS", "5000")?;

    let competitor_max_results = or_default("LEADMAP_COMPETITOR_MAX_RESULTS", "10")
        .parse::<u8>()
        .map_err(|e| invalid("LEADMAP_COMPETITOR_MAX_RESULTS", e.to_string()))?;
    if !(1..=MAX_PAGE_SIZE).contains(&competitor_max_results) {
        return Err(invalid(
            "LEADMAP_COMPETITOR_MAX_RESULTS",
            format!("must be between 1 and {MAX_PAGE_SIZE}, got {competitor_max_results}"),
        ));
    }

    let search_region = or_default("LEADMAP_SEARCH_REGION", "USA");
    let failure_log_path = PathBuf::from(or_default(
        "LEADMAP_FAILURE_LOG_PATH",
        "leadmap_failures.log",
    ));

    Ok(AppConfig {
        places_api_key,
        places_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        competitor_radius_meters,
        competitor_max_results,
        search_region,
        failure_log_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
