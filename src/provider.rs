use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::config::AppConfig;
use crate::error::GenerateError;

/// Seam for the outbound generation call so the orchestrator can be
/// exercised without a network.
#[async_trait]
pub trait GenerateContent {
    /// Send one prompt to the provider and return the raw response body.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

pub type BoxedProvider = Box<dyn GenerateContent + Send + Sync + 'static>;

/// Client for the Gemini `generateContent` endpoint. Issues exactly one
/// POST per invocation; the inner `reqwest::Client` pools connections but
/// there are no retries.
pub struct ProviderClient {
    http: reqwest::Client,
    api_base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
    log_payloads: bool,
}

impl ProviderClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout: config.request_timeout,
            log_payloads: config.log_payloads,
        }
    }
}

#[async_trait]
impl GenerateContent for ProviderClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let payload = json!({
            "contents": [{"parts": [{"text": prompt}]}],
        });
        if self.log_payloads {
            tracing::debug!("Outgoing provider request: {}", payload);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base_url.trim_end_matches("/"),
            self.model
        );
        let response = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        // Read the body before classifying so non-2xx diagnostics are
        // available in the logs
        let body = response.text().await?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::error!("Provider rate limit (429): {}", body);
            return Err(GenerateError::RateLimited { detail: body });
        }
        if !status.is_success() {
            tracing::error!("Provider error {}: {}", status, body);
            return Err(GenerateError::Provider {
                status: status.as_u16(),
                detail: body,
            });
        }

        Ok(body)
    }
}
