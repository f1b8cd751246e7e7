use super::{ErrorResponse, INTERNAL_ERROR_MESSAGE};
use crate::agent::{AgentError, AgentResponse, AgentService};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use std::sync::Arc;
use tracing::{error, warn};

/// Shared state for the agent endpoint
#[derive(Clone)]
pub struct AgentAppState {
    pub agent: Arc<AgentService>,
}

/// Create router with the mock agent endpoint
pub fn create_agent_router(state: AgentAppState) -> Router {
    Router::new()
        .route("/api/mock/agent", post(run_agent))
        .with_state(Arc::new(state))
}

/// POST /api/mock/agent - Run a simulated predict / cluster action
///
/// The body is read as raw bytes so that an unknown action is reported as
/// 400 "Invalid action" rather than as an extractor rejection. Every other
/// failure, including a body that cannot be decoded, is a generic 500.
async fn run_agent(
    State(state): State<Arc<AgentAppState>>,
    body: Bytes,
) -> Result<Json<AgentResponse>, AgentApiError> {
    let response = state.agent.handle_json(&body).await?;
    Ok(Json(response))
}

/// Agent endpoint error types
enum AgentApiError {
    InvalidAction,
    Internal,
}

impl From<AgentError> for AgentApiError {
    fn from(e: AgentError) -> Self {
        match e {
            AgentError::InvalidAction(action) => {
                warn!(action = %action, "Rejected agent request with invalid action");
                AgentApiError::InvalidAction
            }
            AgentError::InvalidRequest(msg) => {
                warn!(error = %msg, "Could not decode agent request");
                AgentApiError::Internal
            }
            AgentError::Internal(msg) => {
                error!(error = %msg, "ML agent failure");
                AgentApiError::Internal
            }
        }
    }
}

impl IntoResponse for AgentApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AgentApiError::InvalidAction => (StatusCode::BAD_REQUEST, "Invalid action"),
            AgentApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE),
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
        });

        (status, body).into_response()
    }
}
