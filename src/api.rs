// 🌐 REST API - Receipt submission and points lookup
// Axum router and handlers; the binary in bin/server.rs only binds and serves

use crate::error::{ScoreError, StoreError};
use crate::ids::{IdGenerator, UuidGenerator};
use crate::receipt::Receipt;
use crate::rules::RuleEngine;
use crate::store::ScoreStore;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<ScoreStore>,
    engine: Arc<RuleEngine>,
    ids: Arc<dyn IdGenerator>,
}

impl AppState {
    pub fn new(store: Arc<ScoreStore>, ids: Arc<dyn IdGenerator>) -> Self {
        AppState {
            store,
            engine: Arc::new(RuleEngine::new()),
            ids,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(ScoreStore::new()), Arc::new(UuidGenerator))
    }
}

// ============================================================================
// Request / Response bodies
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    /// Body is not a receipt document
    Decode(String),
    /// Receipt decoded but could not be scored
    Score(ScoreError),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::Score(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Decode(reason) => format!("Invalid receipt payload: {}", reason),
            ApiError::Score(e) => format!("Cannot compute points: {}", e),
            ApiError::NotFound(_) => "Receipt not found".to_string(),
            ApiError::Internal(reason) => reason.clone(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::DuplicateId(id) => {
                ApiError::Internal(format!("Generated id collided with an existing receipt: {}", id))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// POST /receipts/process - Score a receipt and remember its points
async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ApiError> {
    let receipt = Receipt::from_json(&body).map_err(|e| {
        warn!(error = %e, "Rejected receipt payload");
        ApiError::Decode(e.to_string())
    })?;

    let breakdown = state.engine.breakdown(&receipt).map_err(|e| {
        warn!(error = %e, "Rejected receipt");
        debug!(retailer = %receipt.retailer, total = %receipt.total, "Rejected receipt fields");
        ApiError::Score(e)
    })?;
    let points = breakdown.total();

    let id = state.ids.next_id();
    state.store.put(&id, points)?;

    debug!(%id, contributions = ?breakdown.contributions, "Receipt breakdown");
    info!(%id, points, stored = state.store.len(), "Processed receipt");
    Ok(Json(ProcessResponse { id }))
}

/// GET /receipts/:id/points - Look up points for a processed receipt
async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    let points = state.store.get(&id)?;
    Ok(Json(PointsResponse { points }))
}

/// Build the application router
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
