// Matter Automation Analysis - Web Server
// REST API with Axum over a dataset loaded once at startup

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use matter_automation::aggregate::{aggregate, summarize, Dimension};
use matter_automation::cli::{init_tracing, DataArgs};
use matter_automation::report::ReportBuilder;
use matter_automation::{
    AnalysisConfig, AnalysisError, AnalyzedEntry, Dataset, TaxonomyKind, TaxonomyRegistry,
};

#[derive(Parser, Debug)]
#[command(name = "matter-server")]
#[command(about = "HTTP API for matter automation analysis")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "MATTER_SERVER_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "MATTER_SERVER_PORT")]
    port: u16,

    #[command(flatten)]
    data: DataArgs,
}

/// Shared application state (read-only after startup)
struct AppState {
    config: AnalysisConfig,
    registry: &'static TaxonomyRegistry,
    dataset: Dataset,
}

type SharedState = Arc<AppState>;

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
}

/// Analysis failure rendered as a JSON error body
struct ApiError(AnalysisError);

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AnalysisError::UnknownTaxonomy(_)
            | AnalysisError::UnknownDimension(_)
            | AnalysisError::NotClassified { .. } => StatusCode::BAD_REQUEST,
            AnalysisError::InsufficientData => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            warn!(error = %self.0, "request failed");
        }
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.0.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult = std::result::Result<Response, ApiError>;

impl AppState {
    /// Entries a taxonomy is computed over
    fn entries_for(&self, kind: TaxonomyKind) -> std::result::Result<&[AnalyzedEntry], ApiError> {
        match kind {
            TaxonomyKind::TaskLevel => self.dataset.tasks.as_deref().ok_or_else(|| {
                ApiError(AnalysisError::NotClassified {
                    taxonomy: kind.name().to_string(),
                })
            }),
            _ => Ok(&self.dataset.entries),
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

#[derive(Deserialize)]
struct TaxonomyQuery {
    taxonomy: Option<String>,
}

#[derive(Deserialize)]
struct AggregateQuery {
    /// Comma-separated dimension names
    by: Option<String>,
}

#[derive(Deserialize)]
struct ClassifyQuery {
    text: String,
    taxonomy: Option<String>,
}

fn taxonomy_kind(name: Option<&str>) -> std::result::Result<TaxonomyKind, ApiError> {
    Ok(name.unwrap_or("practice-area").parse::<TaxonomyKind>()?)
}

/// GET /api/health - Health check
async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    #[derive(Serialize)]
    struct Health {
        status: &'static str,
        version: &'static str,
        entries: usize,
        task_entries: Option<usize>,
    }
    ok(Health {
        status: "OK",
        version: matter_automation::VERSION,
        entries: state.dataset.entries.len(),
        task_entries: state.dataset.tasks.as_ref().map(|t| t.len()),
    })
}

/// GET /api/taxonomies - Registered taxonomies with their categories
async fn get_taxonomies(State(state): State<SharedState>) -> impl IntoResponse {
    ok(state.registry.taxonomies())
}

/// GET /api/summary?taxonomy= - Headline figures
async fn get_summary(
    State(state): State<SharedState>,
    Query(query): Query<TaxonomyQuery>,
) -> ApiResult {
    let kind = taxonomy_kind(query.taxonomy.as_deref())?;
    let entries = state.entries_for(kind)?;
    Ok(ok(summarize(entries, kind)?))
}

/// GET /api/aggregate/:taxonomy?by=category,month - Grouped hours
async fn get_aggregate(
    State(state): State<SharedState>,
    Path(taxonomy): Path<String>,
    Query(query): Query<AggregateQuery>,
) -> ApiResult {
    let kind = taxonomy_kind(Some(&taxonomy))?;
    let dimensions = query
        .by
        .as_deref()
        .unwrap_or("category")
        .split(',')
        .filter(|d| !d.trim().is_empty())
        .map(|d| d.parse::<Dimension>())
        .collect::<matter_automation::Result<Vec<_>>>()?;
    let entries = state.entries_for(kind)?;
    Ok(ok(aggregate(entries, &dimensions, kind)?))
}

/// GET /api/projection - Full-year projection and scenarios
async fn get_projection(State(state): State<SharedState>) -> ApiResult {
    let projection = ReportBuilder::new(&state.config, state.registry)
        .project(&state.dataset.entries)?
        .ok_or(ApiError(AnalysisError::InsufficientData))?;
    Ok(ok(projection))
}

/// GET /api/report - Every report table
async fn get_report(State(state): State<SharedState>) -> ApiResult {
    let report = ReportBuilder::new(&state.config, state.registry)
        .build(&state.dataset.entries, state.dataset.tasks.as_deref())?;
    Ok(ok(report))
}

/// GET /api/classify?text=&taxonomy= - Classify one label
async fn classify_text(
    State(state): State<SharedState>,
    Query(query): Query<ClassifyQuery>,
) -> ApiResult {
    let kind = taxonomy_kind(query.taxonomy.as_deref())?;
    let taxonomy = state.registry.get(kind)?;
    Ok(ok(taxonomy.classify(Some(&query.text))))
}

fn router(state: SharedState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/taxonomies", get(get_taxonomies))
        .route("/summary", get(get_summary))
        .route("/aggregate/:taxonomy", get(get_aggregate))
        .route("/projection", get(get_projection))
        .route("/report", get(get_report))
        .route("/classify", get(classify_text))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("matter_automation=info,matter_server=info,tower_http=info");
    let args = Args::parse();

    let registry = TaxonomyRegistry::global()?;
    let (config, dataset) = args.data.load(registry)?;
    info!(
        entries = dataset.entries.len(),
        task_entries = dataset.tasks.as_ref().map_or(0, |t| t.len()),
        "Dataset loaded"
    );

    let state = Arc::new(AppState {
        config,
        registry,
        dataset,
    });

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("API: http://{}/api/summary", addr);

    axum::serve(listener, router(state))
        .await
        .context("Server terminated")?;
    Ok(())
}
