use crate::config::AppConfig;
use crate::error::GenerateError;
use crate::extract::{ExtractMode, extract_reply};
use crate::prompt::{ReplyRequest, build_prompt};
use crate::provider::{BoxedProvider, ProviderClient};

/// Orchestrates prompt construction, the provider call, and response
/// extraction. Stateless and reentrant: one `generate` call corresponds to
/// exactly one outbound request.
pub struct ReplyGenerator {
    provider: BoxedProvider,
    extract_mode: ExtractMode,
}

impl ReplyGenerator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            provider: Box::new(ProviderClient::new(config)),
            extract_mode: config.extract_mode,
        }
    }

    /// Build a generator backed by any `GenerateContent` implementation.
    /// Tests use this to substitute canned provider behavior.
    pub fn with_provider(provider: BoxedProvider, extract_mode: ExtractMode) -> Self {
        Self {
            provider,
            extract_mode,
        }
    }

    /// The public contract: every failure path from the client and the
    /// extractor arrives here as a `GenerateError` value, never a panic.
    pub async fn generate(&self, request: &ReplyRequest) -> Result<String, GenerateError> {
        let prompt = build_prompt(request);
        let raw = self.provider.generate(&prompt).await?;
        extract_reply(&raw, self.extract_mode)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::provider::GenerateContent;

    struct CannedProvider {
        body: String,
    }

    #[async_trait]
    impl GenerateContent for CannedProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            Ok(self.body.clone())
        }
    }

    struct RateLimitedProvider;

    #[async_trait]
    impl GenerateContent for RateLimitedProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            Err(GenerateError::RateLimited {
                detail: r#"{"error":{"code":429,"status":"RESOURCE_EXHAUSTED"}}"#.into(),
            })
        }
    }

    fn request() -> ReplyRequest {
        ReplyRequest {
            email_content: "Are you available tomorrow?".into(),
            tone: "professional".into(),
        }
    }

    #[tokio::test]
    async fn it_returns_the_candidate_text() {
        let provider = CannedProvider {
            body: r#"{"candidates":[{"content":{"parts":[{"text":"Hello"}]}}]}"#.into(),
        };
        let generator =
            ReplyGenerator::with_provider(Box::new(provider), ExtractMode::Strict);

        let text = generator.generate(&request()).await.unwrap();
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn it_surfaces_rate_limiting_with_a_fixed_message() {
        let generator =
            ReplyGenerator::with_provider(Box::new(RateLimitedProvider), ExtractMode::Strict);

        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerateError::RateLimited { .. }));
        assert_eq!(
            err.user_message(),
            "AI quota exceeded. Please try again after some time."
        );
    }

    #[tokio::test]
    async fn it_surfaces_malformed_bodies_as_parse_errors() {
        let provider = CannedProvider {
            body: "<html>bad gateway</html>".into(),
        };
        let generator =
            ReplyGenerator::with_provider(Box::new(provider), ExtractMode::Strict);

        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerateError::Parse { .. }));
    }

    #[tokio::test]
    async fn it_handles_entirely_empty_input() {
        let provider = CannedProvider {
            body: r#"{"candidates":[]}"#.into(),
        };
        let generator =
            ReplyGenerator::with_provider(Box::new(provider), ExtractMode::Strict);

        let empty = ReplyRequest {
            email_content: "".into(),
            tone: "".into(),
        };
        let text = generator.generate(&empty).await.unwrap();
        assert_eq!(text, crate::extract::NO_RESPONSE_SENTINEL);
    }
}
