//! Analysis API Routes
//!
//! Generate, list and export mock technical analyses.

use analysis_core::{normalize_ticker, AnalysisResult, AnalysisSummary, DEFAULT_TICKER};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::request_id::RequestId;
use crate::{AppError, AppState};

/// Body of an analysis request
#[derive(Debug, PartialEq, Eq, utoipa::ToSchema)]
pub struct AnalyzeRequest {
    /// Defaults to `UNKNOWN` when absent
    pub ticker: Option<String>,
}

impl AnalyzeRequest {
    /// Accepts only a JSON object. An absent `ticker` is allowed; a present
    /// one must be a string (`null` included in the rejects).
    pub fn from_json(body: Value) -> Result<Self, AppError> {
        let Value::Object(mut fields) = body else {
            return Err(AppError::Validation(
                "request body must be a JSON object".to_string(),
            ));
        };

        let ticker = match fields.remove("ticker") {
            None => None,
            Some(Value::String(raw)) => Some(raw),
            Some(Value::Null) => {
                return Err(AppError::Validation("ticker must not be null".to_string()))
            }
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "ticker must be a string, got {other}"
                )))
            }
        };
        Ok(Self { ticker })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AnalysisListResponse {
    pub analyses: Vec<AnalysisSummary>,
    pub total: usize,
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analysis", post(analyze_stock))
        .route("/api/analyses", get(list_analyses))
        .route("/api/export/:ticker", get(export_analysis))
}

#[utoipa::path(
    post,
    path = "/api/analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Freshly generated analysis", body = AnalysisResult),
        (status = 400, description = "Malformed request", body = crate::ErrorBody)
    ),
    tag = "Analysis"
)]
pub async fn analyze_stock(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let request = AnalyzeRequest::from_json(body)?;

    let ticker = match request.ticker {
        Some(raw) => normalize_ticker(&raw)?,
        None => DEFAULT_TICKER.to_string(),
    };

    // Generate fully before touching the store
    let result = {
        let mut rng = state.entropy.source();
        technical_analysis::generate(&ticker, rng.as_mut())
    };
    state.store.upsert(&ticker, result.clone());

    tracing::info!(
        request_id = %request_id.0,
        ticker = %ticker,
        recommendation = %result.recommendation,
        confidence = result.confidence_percent,
        cached = state.store.count(),
        "Analysis generated"
    );

    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/analyses",
    responses((status = 200, description = "Summaries of every cached analysis", body = AnalysisListResponse)),
    tag = "Analysis"
)]
pub async fn list_analyses(State(state): State<AppState>) -> Json<AnalysisListResponse> {
    let analyses = state.store.list();
    let total = analyses.len();
    Json(AnalysisListResponse { analyses, total })
}

#[utoipa::path(
    get,
    path = "/api/export/{ticker}",
    params(("ticker" = String, Path, description = "Ticker symbol, case-insensitive")),
    responses(
        (status = 200, description = "The cached analysis", body = AnalysisResult),
        (status = 404, description = "Ticker never analyzed", body = crate::ErrorBody)
    ),
    tag = "Analysis"
)]
pub async fn export_analysis(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<AnalysisResult>, AppError> {
    state
        .store
        .get(&ticker)
        .map(|entry| Json(entry.data))
        .ok_or_else(|| AppError::NotFound("Analysis not found".to_string()))
}
