//! Desk API route handlers.
//!
//! All endpoints return JSON. Shared state is an `Arc<DeskState>`; every
//! per-user action goes through the session registry keyed by the id in
//! the path.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::engine::registry::SessionRegistry;
use crate::engine::session::{EvaluationView, FetchNotice, SessionView};
use crate::price::PriceSource;
use crate::storage::PlanSummary;
use crate::types::{DeskError, TradeInputs, TradePlan, ZoneLabel};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DeskState {
    pub registry: SessionRegistry,
    pub prices: Arc<dyn PriceSource>,
}

impl DeskState {
    pub fn new(prices: Arc<dyn PriceSource>, max_sessions: usize) -> Self {
        Self {
            registry: SessionRegistry::new(max_sessions),
            prices,
        }
    }
}

pub type AppState = Arc<DeskState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for DeskError {
    fn into_response(self) -> Response {
        let status = match &self {
            DeskError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            DeskError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/zones
pub async fn get_zones() -> Json<Vec<&'static str>> {
    Json(ZoneLabel::ALL.iter().map(|z| z.as_str()).collect())
}

/// POST /api/sessions
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let id = state.registry.create().await;
    (StatusCode::CREATED, Json(SessionCreated { id }))
}

/// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, DeskError> {
    let view = state.registry.read_session(id, |s| s.view()).await?;
    Ok(Json(view))
}

/// DELETE /api/sessions/:id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, DeskError> {
    if state.registry.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(DeskError::SessionNotFound(id))
    }
}

/// POST /api/sessions/:id/price
///
/// A failed fetch is still a 200: the notice carries `ok: false` and the
/// message to show, and the session keeps its previous quote.
pub async fn fetch_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FetchNotice>, DeskError> {
    if !state.registry.contains(id).await {
        return Err(DeskError::SessionNotFound(id));
    }

    // Outbound call happens without holding the registry lock
    let result = state.prices.fetch_price().await;

    let notice = state
        .registry
        .with_session(id, |s| s.record_fetch(result))
        .await?;
    Ok(Json(notice))
}

/// POST /api/sessions/:id/evaluate
pub async fn evaluate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(inputs): Json<TradeInputs>,
) -> Result<Json<EvaluationView>, DeskError> {
    let view = state.registry.read_session(id, |s| s.evaluate(&inputs)).await?;
    Ok(Json(view))
}

/// GET /api/sessions/:id/plans
pub async fn list_plans(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TradePlan>>, DeskError> {
    let plans = state
        .registry
        .read_session(id, |s| s.plans().list_all().to_vec())
        .await?;
    Ok(Json(plans))
}

/// POST /api/sessions/:id/plans
pub async fn save_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(inputs): Json<TradeInputs>,
) -> Result<(StatusCode, Json<TradePlan>), DeskError> {
    let plan = state.registry.with_session(id, |s| s.save_plan(&inputs)).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/sessions/:id/plans/summary
pub async fn plan_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanSummary>, DeskError> {
    let summary = state.registry.read_session(id, |s| s.plans().summary()).await?;
    Ok(Json(summary))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
