use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::error::GenerateError;
use crate::generate::ReplyGenerator;
use crate::prompt::ReplyRequest;

type SharedState = Arc<AppState>;

pub struct AppState {
    generator: ReplyGenerator,
    log_payloads: bool,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            generator: ReplyGenerator::new(config),
            log_payloads: config.log_payloads,
        }
    }

    /// State with a pre-built generator, used by integration tests to
    /// avoid real provider calls.
    pub fn with_generator(generator: ReplyGenerator, log_payloads: bool) -> Self {
        Self {
            generator,
            log_payloads,
        }
    }
}

// The routing layer owns the mapping from failure kind to status code:
// rate limiting keeps its own status so clients see the provider's
// backpressure, everything else collapses to a 500.
fn error_status(err: &GenerateError) -> StatusCode {
    match err {
        GenerateError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        GenerateError::Provider { .. }
        | GenerateError::Transport(_)
        | GenerateError::Parse { .. }
        | GenerateError::EmptyResponse => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn generate_reply(
    State(state): State<SharedState>,
    Json(payload): Json<ReplyRequest>,
) -> (StatusCode, String) {
    if state.log_payloads {
        tracing::debug!(
            "Incoming reply request: emailContent={:?} tone={:?}",
            payload.email_content,
            payload.tone
        );
    }

    match state.generator.generate(&payload).await {
        Ok(text) => (StatusCode::OK, text),
        Err(err) => {
            tracing::error!("Reply generation failed: {}", err);
            (error_status(&err), err.user_message().to_string())
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "app": "replygen",
    }))
}

pub fn app(app_state: AppState) -> Router {
    let shared_state = SharedState::new(app_state);
    let cors = CorsLayer::permissive();

    Router::new()
        // Generate a reply for an email
        .route("/api/email/generate", post(generate_reply))
        // Liveness probes, both paths for compatibility
        .route("/api/email/health", get(health))
        .route("/check/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app_state = AppState::new(&config);
    let app = app(app_state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
