pub mod app_config;
pub mod config;
pub mod extract;
pub mod leads;
pub mod matcher;
pub mod names;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use extract::{
    closing_time, enrichment_for, is_open_24_hours, is_operational, maps_link_for, weekend_open,
};
pub use leads::{
    Candidate, DayTime, EnrichedLead, Enrichment, LatLng, Lead, LeadOutcome, OpeningHours, Period,
    ENRICHMENT_COLUMNS,
};
pub use matcher::{normalize_website, websites_match};
pub use names::{build_search_query, clean_company_name};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
