//! HTTP front end for the mock technical analysis service.

pub mod analysis_routes;
pub mod config;
pub mod dashboard;
pub mod request_id;
pub mod security_headers;


use std::any::Any;
use std::sync::Arc;

use analysis_core::{AnalysisError, AnalysisStore, EntropySource, OsEntropy};
use axum::{
    extract::State,
    http::{Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

use crate::config::ServerConfig;
use crate::request_id::request_id_middleware;
use crate::security_headers::security_headers_middleware;

/// Reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AnalysisStore>,
    pub entropy: Arc<dyn EntropySource>,
    pub enable_hsts: bool,
}

impl AppState {
    pub fn new(entropy: Arc<dyn EntropySource>, enable_hsts: bool) -> Self {
        Self {
            store: Arc::new(AnalysisStore::new()),
            entropy,
            enable_hsts,
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
}

impl ErrorBody {
    fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                "Internal server error".to_string()
            }
            AppError::Validation(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                msg.clone()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub cached_analyses: usize,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "System"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        cached_analyses: state.store.count(),
        version: VERSION.to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Stock Analysis API"),
    paths(
        analysis_routes::analyze_stock,
        analysis_routes::list_analyses,
        analysis_routes::export_analysis,
        health,
    ),
    components(schemas(
        analysis_core::AnalysisResult,
        analysis_core::AnalysisSummary,
        analysis_core::TechnicalIndicators,
        analysis_core::Recommendation,
        analysis_core::RiskLevel,
        analysis_routes::AnalyzeRequest,
        analysis_routes::AnalysisListResponse,
        ErrorBody,
        HealthResponse,
    )),
    tags(
        (name = "Analysis", description = "Mock technical analysis generation and export"),
        (name = "System", description = "Service health")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> AppError {
    AppError::RouteNotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Turn a handler panic into the standard 500 body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new("Internal server error")),
    )
        .into_response()
}

pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(dashboard::index))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(analysis_routes::analysis_routes());

    with_middleware(routes, state)
}

/// Attach the JSON fallbacks and the middleware stack to a set of routes.
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<axum::body::Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    });
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    routes
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace)
        .layer(cors)
        .with_state(state)
}

/// Install the global tracing subscriber.
pub fn init_tracing(json_logging: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "api_server=info,technical_analysis=info,tower_http=info".into());

    if json_logging {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}

pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(OsEntropy), config.enable_hsts);
    let app = build_router(state.clone());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Stock analysis API v{} listening on http://{}", VERSION, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped ({} analyses discarded)", state.store.count());
    Ok(())
}
