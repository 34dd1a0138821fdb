use thiserror::Error;

/// Everything that can go wrong between accepting a reply request and
/// handing back generated text. Diagnostic detail stays in the variant
/// (and in the logs); callers show `user_message` and nothing else.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("provider rate limited the request")]
    RateLimited { detail: String },

    #[error("provider returned status {status}")]
    Provider { status: u16, detail: String },

    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not parse provider response: {detail}")]
    Parse { detail: String },

    #[error("provider returned an empty response body")]
    EmptyResponse,
}

impl GenerateError {
    /// Stable message safe to return to the caller. Raw provider bodies,
    /// statuses, and credentials never pass through here.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerateError::RateLimited { .. } => {
                "AI quota exceeded. Please try again after some time."
            }
            GenerateError::Provider { .. } => "AI service error.",
            GenerateError::Transport(_) => "Internal server error.",
            GenerateError::Parse { .. } | GenerateError::EmptyResponse => {
                "Failed to generate reply."
            }
        }
    }
}
