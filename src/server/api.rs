use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use std::error::Error;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::error::RelayError;
use crate::llm::ChatClient;
use crate::models::chat::{ChatErrorResponse, ChatRequest, ChatResponse};
use crate::prompt;

#[derive(Clone)]
struct AppState {
    client: Option<Arc<dyn ChatClient>>,
}

/// Relay router: `POST /chat` plus a liveness probe, wrapped in the
/// permissive CORS layer that also answers `OPTIONS` preflights with an
/// empty 200 before any handler runs.
pub fn router(client: Option<Arc<dyn ChatClient>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]);

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(AppState { client })
}

pub async fn start_http_server(
    addr: &str,
    client: Option<Arc<dyn ChatClient>>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let app = router(client);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Starting HTTP API server on: http://{}", addr);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn healthz() -> &'static str {
    info!("healthz check");
    "OK"
}

/// `RECEIVE → VALIDATE → BUILD_PROMPT → CALL_UPSTREAM → RESPOND`. The body
/// is decoded by hand so malformed shapes flow through the same error
/// envelope as every other failure.
async fn chat_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ChatResponse>, RelayError> {
    let req: ChatRequest = serde_json::from_str(&body)?;

    let client = state.client.as_ref().ok_or(RelayError::MissingCredential)?;
    if req.message.is_empty() {
        return Err(RelayError::MissingMessage);
    }

    info!("Received message: {}", req.message);

    let prompt = prompt::build_prompt(&req.message, &req.conversation_history);
    let completion = client.complete(&prompt).await?;

    info!("AI response generated successfully");
    Ok(Json(ChatResponse::new(completion.response)))
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error!("Function error: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatErrorResponse::new(self.to_string())),
        )
            .into_response()
    }
}
