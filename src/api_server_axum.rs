use crate::agents::ConversationDriver;
use crate::analysis::{self, AnalysisOutcome};
use crate::market::MarketDataPort;
use anyhow::Result;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

const INDEX_HTML: &str = include_str!("index.html");

// -----------------------------------------------
// API REQUEST/RESPONSE MODELS
// -----------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TickerQuery {
    #[serde(default)]
    pub ticker: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub ticker: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub processing_time_ms: Option<u64>,
}

impl<T> ApiResponse<T> {
    fn from_result(result: Result<T>, start_time: Instant) -> Self {
        let processing_time_ms = Some(start_time.elapsed().as_millis() as u64);
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
                processing_time_ms,
            },
            Err(e) => {
                warn!(error = %format!("{:#}", e), "request failed");
                Self {
                    success: false,
                    data: None,
                    error: Some(format!("{:#}", e)),
                    processing_time_ms,
                }
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// -----------------------------------------------
// APPLICATION STATE
// -----------------------------------------------

#[derive(Clone)]
pub struct AppState {
    market: Arc<dyn MarketDataPort>,
    driver: Arc<ConversationDriver>,
}

impl AppState {
    pub fn new(market: Arc<dyn MarketDataPort>, driver: ConversationDriver) -> Self {
        Self {
            market,
            driver: Arc::new(driver),
        }
    }
}

// -----------------------------------------------
// API HANDLERS
// -----------------------------------------------

/// GET / - Ticker form
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/options?ticker=AAPL - Option data without the agents
async fn get_options(
    Query(query): Query<TickerQuery>,
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<AnalysisOutcome>>, StatusCode> {
    let start_time = Instant::now();
    info!(ticker = %query.ticker, "options requested");

    let result = analysis::snapshot(app_state.market.as_ref(), &query.ticker).await;
    Ok(Json(ApiResponse::from_result(result, start_time)))
}

/// POST /api/analyze {"ticker": "AAPL"} - Option data plus the agent transcript
async fn post_analyze(
    State(app_state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalysisOutcome>>, StatusCode> {
    let start_time = Instant::now();
    info!(ticker = %request.ticker, "analysis requested");

    let result = analysis::analyze(
        app_state.market.as_ref(),
        app_state.driver.as_ref(),
        &request.ticker,
    )
    .await;
    Ok(Json(ApiResponse::from_result(result, start_time)))
}

// -----------------------------------------------
// SERVER SETUP
// -----------------------------------------------

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/options", get(get_options))
        .route("/api/analyze", post(post_analyze))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

pub async fn start_server(port: u16, app_state: AppState) -> Result<()> {
    let app = build_router(app_state);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Options analyzer running on http://{}", addr);
    info!("Available endpoints:");
    info!("   GET  /");
    info!("   GET  /api/health");
    info!("   GET  /api/options?ticker=AAPL");
    info!("   POST /api/analyze");

    axum::serve(listener, app).await?;
    Ok(())
}
