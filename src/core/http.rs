//! HTTP endpoint server using Axum

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::analysis::{Analysis, Analyzer};
use crate::config::Config;
use crate::core::widget;
use crate::imaging::{check_decoders, CapabilityError, ImagingError};
use crate::metrics::Metrics;

/// Multipart field that carries the chart file.
pub const UPLOAD_FIELD: &str = "file";

pub const SERVICE_NAME: &str = "fvg-detector";

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub analyzer: Arc<Analyzer>,
    /// Outcome of the startup decoder check. Analysis is refused while this
    /// holds an error.
    pub decoders: Arc<Result<(), CapabilityError>>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        metrics: Arc<Metrics>,
        analyzer: Analyzer,
        decoders: Result<(), CapabilityError>,
        max_upload_bytes: usize,
    ) -> Self {
        let status = if decoders.is_ok() { "healthy" } else { "degraded" };
        Self {
            health: Arc::new(RwLock::new(HealthStatus {
                status: status.to_string(),
            })),
            metrics,
            start_time: Arc::new(Instant::now()),
            analyzer: Arc::new(analyzer),
            decoders: Arc::new(decoders),
            max_upload_bytes,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

/// Why an upload produced no verdict.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("{0}")]
    Unavailable(String),

    #[error("Missing 'file' field in upload form")]
    MissingFile,

    #[error("{message}")]
    Upload { status: StatusCode, message: String },

    #[error(transparent)]
    Imaging(#[from] ImagingError),

    #[error("Analysis task failed")]
    Internal,
}

impl AnalyzeError {
    pub fn status(&self) -> StatusCode {
        match self {
            AnalyzeError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AnalyzeError::MissingFile => StatusCode::BAD_REQUEST,
            AnalyzeError::Upload { status, .. } => *status,
            AnalyzeError::Imaging(ImagingError::UnsupportedFileType(_)) => StatusCode::BAD_REQUEST,
            AnalyzeError::Imaging(ImagingError::Decode(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AnalyzeError::Imaging(_) | AnalyzeError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for AnalyzeError {
    fn from(err: MultipartError) -> Self {
        AnalyzeError::Upload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    let decoders = match &*state.decoders {
        Ok(()) => "available".to_string(),
        Err(e) => e.to_string(),
    };
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME,
        "label_source": state.analyzer.source_name(),
        "decoders": decoders,
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Pull the chart out of the form, then decode, detect and evaluate it off the
/// async runtime.
async fn run_analysis(state: &AppState, mut multipart: Multipart) -> Result<Analysis, AnalyzeError> {
    if let Err(e) = &*state.decoders {
        return Err(AnalyzeError::Unavailable(e.to_string()));
    }

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        upload = Some((file_name, bytes));
        break;
    }
    let (file_name, bytes) = upload.ok_or(AnalyzeError::MissingFile)?;

    let analyzer = state.analyzer.clone();
    let result = tokio::task::spawn_blocking(move || analyzer.analyze_upload(&file_name, &bytes))
        .await
        .map_err(|e| {
            error!(error = %e, "Analysis task panicked");
            AnalyzeError::Internal
        })?;

    match result {
        Ok(analysis) => {
            state.metrics.record_verdict(&analysis.verdict);
            Ok(analysis)
        }
        Err(e) => {
            if e.is_decode_failure() {
                state.metrics.record_decode_failure();
            }
            warn!(error = %e, "Upload rejected");
            Err(e.into())
        }
    }
}

/// Analyze an uploaded chart and return the verdict as JSON
async fn analyze_api(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Analysis>, AnalyzeError> {
    run_analysis(&state, multipart).await.map(Json)
}

/// Analyze an uploaded chart and render the result page
async fn analyze_page(State(state): State<AppState>, multipart: Multipart) -> Response {
    match run_analysis(&state, multipart).await {
        Ok(analysis) => Html(widget::result_page(&analysis)).into_response(),
        Err(e) => (e.status(), Html(widget::error_page(&e.to_string()))).into_response(),
    }
}

async fn upload_form(State(state): State<AppState>) -> Html<String> {
    let notice = match &*state.decoders {
        Ok(()) => None,
        Err(e) => Some(e.to_string()),
    };
    Html(widget::upload_page(notice.as_deref()))
}

pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;
    Router::new()
        .route("/", get(upload_form))
        .route("/analyze", post(analyze_page))
        .route("/api/analyze", post(analyze_api))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);

    let decoders = check_decoders();
    if let Err(e) = &decoders {
        error!(error = %e, "Image decoding unavailable - uploads will be refused");
    }

    let analyzer = Analyzer::with_source(config.label_source.build());
    info!(label_source = analyzer.source_name(), "Label source ready");

    let state = AppState::new(metrics, analyzer, decoders, config.max_upload_bytes);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
