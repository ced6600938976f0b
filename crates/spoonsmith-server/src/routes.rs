//! Router and request handlers.

use crate::form;
use axum::{
    Router,
    extract::{Query, State},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use spoonsmith_core::{
    BowlShape, ComposerConfig, FormLimits, HandleShape, PresentationMode, ShapeComposer, SpecError,
    SpoonSpec,
};
use spoonsmith_render::{OutputFormat, RenderContext, Renderer, RendererError};
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Shared, read-only server state.
#[derive(Debug)]
pub struct AppState {
    pub composer: ShapeComposer,
    pub limits: FormLimits,
}

impl AppState {
    pub fn new(config: ComposerConfig) -> Self {
        Self { composer: ShapeComposer::new(config), limits: FormLimits::default() }
    }
}

/// Handler errors. Bad input is the client's fault; render failures are ours.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Spec(e) => {
                debug!(error = %e, "rejected design parameters");
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            ApiError::Render(RendererError::Spec(e)) => ApiError::Spec(e).into_response(),
            ApiError::Render(e) => {
                error!(error = %e, "render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}

/// Design parameters as submitted by the form. Missing fields take slider defaults.
#[derive(Debug, Default, Deserialize)]
pub struct DesignQuery {
    pub bowl_shape: Option<String>,
    pub handle_shape: Option<String>,
    pub canvas_width: Option<f64>,
    pub canvas_height: Option<f64>,
    pub bowl_width: Option<f64>,
    pub bowl_length: Option<f64>,
    pub handle_width: Option<f64>,
    pub handle_length: Option<f64>,
    pub mode: Option<String>,
    pub scale: Option<f64>,
}

impl DesignQuery {
    /// Parse and range-check the spec. Query strings bypass the sliders, so
    /// every dimension is checked against its slider bounds.
    pub fn to_spec(&self, limits: &FormLimits) -> Result<SpoonSpec, SpecError> {
        let bowl_shape = match &self.bowl_shape {
            Some(raw) => raw.parse::<BowlShape>()?,
            None => BowlShape::default(),
        };
        let handle_shape = match &self.handle_shape {
            Some(raw) => raw.parse::<HandleShape>()?,
            None => HandleShape::default(),
        };
        let spec = SpoonSpec {
            canvas_width: self.canvas_width.unwrap_or(limits.canvas_width.default),
            canvas_height: self.canvas_height.unwrap_or(limits.canvas_height.default),
            bowl_shape,
            bowl_width: self.bowl_width.unwrap_or(limits.bowl_width.default),
            bowl_length: self.bowl_length.unwrap_or(limits.bowl_length.default),
            handle_shape,
            handle_width: self.handle_width.unwrap_or(limits.handle_width.default),
            handle_length: self.handle_length.unwrap_or(limits.handle_length.default),
        };
        limits.check(&spec)?;
        Ok(spec)
    }

    pub fn mode_or(&self, default: PresentationMode) -> Result<PresentationMode, SpecError> {
        self.mode.as_deref().map_or(Ok(default), |raw| raw.parse())
    }

    pub fn scale(&self, limits: &FormLimits) -> Result<f64, SpecError> {
        let scale = self.scale.unwrap_or(limits.scale.default);
        limits.check_scale(scale)?;
        Ok(scale)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/design", get(design))
        .route("/spoon.png", get(spoon_png))
        .route("/template.svg", get(template_svg))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Design form with default values.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let spec = state.limits.default_spec();
    Html(form::index_page(&state.limits, &spec, PresentationMode::Compact))
}

/// Form plus preview of the submitted design.
pub async fn design(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DesignQuery>,
) -> Result<Html<String>, ApiError> {
    let spec = query.to_spec(&state.limits)?;
    let mode = query.mode_or(PresentationMode::Compact)?;
    Ok(Html(form::design_page(&state.limits, &spec, mode)))
}

/// Raster download, compact by default.
pub async fn spoon_png(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DesignQuery>,
) -> Result<Response, ApiError> {
    render_download(&state, &query, OutputFormat::Png)
}

/// Vector template download, annotated by default.
pub async fn template_svg(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DesignQuery>,
) -> Result<Response, ApiError> {
    render_download(&state, &query, OutputFormat::Svg)
}

/// Health check
pub async fn health() -> &'static str {
    "ok"
}

/// Renders in memory; nothing touches the filesystem.
fn render_download(
    state: &AppState,
    query: &DesignQuery,
    format: OutputFormat,
) -> Result<Response, ApiError> {
    let spec = query.to_spec(&state.limits)?;
    let mode = query.mode_or(format.default_mode())?;
    format.check_mode(mode)?;
    let scale = query.scale(&state.limits)?;

    let composition = state.composer.compose(&spec, mode)?;
    let ctx = RenderContext::new(&composition).with_scale(scale);
    let mut renderer = format.renderer();
    let bytes = renderer.render(&ctx)?;
    debug!(%format, %mode, bytes = bytes.len(), "rendered download");

    Ok((
        [
            (CONTENT_TYPE, renderer.media_type().to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", renderer.file_name())),
        ],
        bytes,
    )
        .into_response())
}
