//! HTTP routes for the parameter catalog
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/v1/parameters` | List all parameters |
//! | `GET` | `/api/v1/parameters/stats` | Catalog statistics |
//! | `GET` | `/api/v1/parameters/stream` | SSE feed of parameter changes |
//! | `GET` | `/api/v1/parameters/{key}` | Get a parameter by key |
//! | `POST` | `/api/v1/parameters` | Create or update a parameter |
//! | `PUT` | `/api/v1/parameters/{key}` | Update a parameter's value |
//! | `DELETE` | `/api/v1/parameters/{key}` | Remove a parameter |
//!
//! Responses carry no-cache headers so clients always read current values.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use futures_util::stream::{self, Stream};
use serde::{Deserialize, Serialize};

use crate::catalog::{ChangeBroadcaster, ChangeKind, Parameter};

use super::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// The catalog broadcaster all handlers operate on
    pub broadcaster: Arc<ChangeBroadcaster>,
    sse_keep_alive: Duration,
}

/// Creates the parameter REST API router
///
/// All routes are nested under `/api/v1/parameters`.
pub fn parameter_router(broadcaster: Arc<ChangeBroadcaster>, config: &ServerConfig) -> Router {
    let state = AppState {
        broadcaster,
        sse_keep_alive: config.sse_keep_alive,
    };

    Router::new()
        .route(
            "/api/v1/parameters",
            get(list_parameters).post(create_parameter),
        )
        .route("/api/v1/parameters/stats", get(catalog_stats))
        .route("/api/v1/parameters/stream", get(stream_changes))
        .route(
            "/api/v1/parameters/{key}",
            get(get_parameter)
                .put(update_parameter)
                .delete(delete_parameter),
        )
        .with_state(state)
}

/// Body of a PUT request; the key comes from the path
#[derive(Debug, Deserialize)]
struct ValueBody {
    value: String,
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn no_cache_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, must-revalidate"),
        ),
        (header::PRAGMA, HeaderValue::from_static("no-cache")),
        (header::EXPIRES, HeaderValue::from_static("0")),
    ]
}

fn error_response(status: StatusCode, msg: impl Into<String>) -> impl IntoResponse {
    (
        status,
        no_cache_headers(),
        Json(ErrorResponse { error: msg.into() }),
    )
}

/// `GET /api/v1/parameters` — list all parameters
async fn list_parameters(State(state): State<AppState>) -> impl IntoResponse {
    let parameters = state.broadcaster.find_all().await;
    (no_cache_headers(), Json(parameters))
}

/// `GET /api/v1/parameters/{key}` — get one parameter
async fn get_parameter(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    match state.broadcaster.find_by_key(&key).await {
        Some(parameter) => (StatusCode::OK, no_cache_headers(), Json(parameter)).into_response(),
        None => {
            error_response(StatusCode::NOT_FOUND, format!("parameter {key} not found"))
                .into_response()
        }
    }
}

/// `POST /api/v1/parameters` — create or update a parameter
///
/// Replies 201 either way; the catalog treats create and update as one
/// upsert operation.
async fn create_parameter(
    State(state): State<AppState>,
    Json(body): Json<Parameter>,
) -> impl IntoResponse {
    let stored = state
        .broadcaster
        .upsert(Parameter::new(body.key, body.value))
        .await;
    (StatusCode::CREATED, no_cache_headers(), Json(stored))
}

/// `PUT /api/v1/parameters/{key}` — update a parameter's value
async fn update_parameter(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(body): Json<ValueBody>,
) -> impl IntoResponse {
    let stored = state
        .broadcaster
        .upsert(Parameter::new(key, body.value))
        .await;
    (StatusCode::OK, no_cache_headers(), Json(stored))
}

/// `DELETE /api/v1/parameters/{key}` — remove a parameter
async fn delete_parameter(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    match state.broadcaster.remove(&key).await {
        Some(removed) => (StatusCode::OK, no_cache_headers(), Json(removed)).into_response(),
        None => {
            error_response(StatusCode::NOT_FOUND, format!("parameter {key} not found"))
                .into_response()
        }
    }
}

/// `GET /api/v1/parameters/stats` — catalog statistics
async fn catalog_stats(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.broadcaster.stats().await;
    (no_cache_headers(), Json(stats))
}

/// `GET /api/v1/parameters/stream` — live change feed as server-sent events
///
/// Each event is framed with the change kind as the SSE event name and the
/// parameter as JSON data. DELETED changes carry no current state, so the
/// wire feed skips them.
async fn stream_changes(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let subscription = state.broadcaster.subscribe().await;

    let stream = stream::unfold(subscription, |mut subscription| async move {
        loop {
            let change = subscription.recv().await?;
            if change.kind == ChangeKind::Deleted {
                continue;
            }

            let event = Event::default()
                .event(change.kind.as_str())
                .json_data(&change.parameter);
            return Some((event, subscription));
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(state.sse_keep_alive))
}
