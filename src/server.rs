use crate::config::GatewayConfig;
use crate::logging::{LogLevel, SharedLogger};
use crate::proxy::GatewayHandler;
use crate::translate::openai_types::{ErrorEnvelope, ModelList};
use crate::translate::response::model_list;

use axum::extract::{Request, State};
use axum::http::header::HeaderName;
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Request headers browsers may send on cross-origin calls.
pub const CORS_ALLOWED_HEADERS: &[&str] = &[
    "content-type",
    "authorization",
    "accept",
    "accept-language",
    "accept-encoding",
    "connection",
    "host",
    "origin",
    "referer",
    "sec-fetch-dest",
    "sec-fetch-mode",
    "sec-fetch-site",
    "user-agent",
];

pub const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

pub struct AppState {
    pub config: GatewayConfig,
    pub gateway: GatewayHandler,
    pub logger: SharedLogger,
}

/// CORS and preflight logging wrap the whole route table, so every `OPTIONS`
/// request (any path) is answered before routing and carries the same headers.
pub fn build_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/v1/chat/completions", post(handle_chat_completions))
        .route("/v1/models", get(handle_models))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Router::new()
        .fallback_service(routes)
        .layer(cors_layer())
        .layer(middleware::from_fn_with_state(state, log_preflight))
}

/// Any `OPTIONS` request is answered here with an empty 200.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(
            CORS_ALLOWED_HEADERS
                .iter()
                .copied()
                .map(HeaderName::from_static)
                .collect::<Vec<_>>(),
        )
        .max_age(CORS_MAX_AGE)
}

async fn log_preflight(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let headers: serde_json::Map<String, serde_json::Value> = req
            .headers()
            .iter()
            .filter(|(name, _)| name.as_str() != "authorization")
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), serde_json::Value::String(v.to_string())))
            })
            .collect();

        state.logger.log_with_context(
            LogLevel::Info,
            "cors",
            format!("Preflight for {}", req.uri().path()),
            serde_json::Value::Object(headers),
        );
    }

    next.run(req).await
}

async fn handle_chat_completions(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match state.gateway.handle(&body).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => {
            state
                .logger
                .error("server", format!("Failed to build completion: {}", e));
            let err = ErrorEnvelope::new(e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}

async fn handle_models() -> Json<ModelList> {
    Json(model_list())
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "credential_configured": state.gateway.has_credential(),
        "port": state.config.port,
    }))
}
