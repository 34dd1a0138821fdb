use std::time::Duration;

use crate::extract::ExtractMode;

/// Read-only configuration shared across invocations. Constructed once at
/// startup and never mutated.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub model: String,
    pub request_timeout: Duration,
    /// When set, incoming payloads and outgoing provider requests are
    /// logged at debug level. Off by default so user email content stays
    /// out of the logs.
    pub log_payloads: bool,
    pub extract_mode: ExtractMode,
}

impl AppConfig {
    pub fn new(api_base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            request_timeout: Duration::from_secs(30),
            log_payloads: false,
            extract_mode: ExtractMode::Strict,
        }
    }
}
