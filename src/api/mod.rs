// HTTP APIs: the mock agent endpoint and the read-only map data endpoints

mod agent;
mod fixtures;

pub use agent::{create_agent_router, AgentAppState};
pub use fixtures::{create_fixture_router, FixtureAppState};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

/// Error response body shared by every endpoint
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Body returned for any unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Turns a handler panic into the same 500 body as any other internal failure.
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
        }),
    )
        .into_response()
}
