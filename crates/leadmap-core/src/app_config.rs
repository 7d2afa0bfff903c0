use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub places_api_key: String,
    pub places_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub competitor_radius_meters: f64,
    pub competitor_max_results: u8,
    pub search_region: String,
    pub failure_log_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("competitor_radius_meters", &self.competitor_radius_meters)
            .field("competitor_max_results", &self.competitor_max_results)
            .field("search_region", &self.search_region)
            .field("failure_log_path", &self.failure_log_path)
            .finish()
    }
}
