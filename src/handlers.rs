use crate::circles::PostpaidDirectory;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::BalanceResponse;
use crate::services::BalanceService;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state injected into handlers.
///
/// Built once at startup after both circle directories are loaded; read-only
/// afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Balance inquiry pipeline, holding the prepaid directory.
    pub service: BalanceService,
    /// Postpaid circle directory.
    pub postpaid: Arc<PostpaidDirectory>,
}

/// Assembles the HTTP routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/balance/*params", get(get_balance))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint.
///
/// Reports the service version and how many circles each directory holds.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "prepaid_circles": state.service.prepaid().len(),
            "postpaid_circles": state.postpaid.len(),
        })),
    )
}

/// GET /
///
/// Landing page lives elsewhere; redirect there.
pub async fn home(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&state.config.home_redirect_url)
}

/// GET /balance/{phone}/{circle-code}
///
/// The segments are captured with a wildcard so that an empty phone or
/// circle (`/balance//KL`, `/balance/9446012345/`) reaches validation and
/// gets a 400. Anything other than exactly two segments is rejected before
/// the vendor is called. The bare prefix (`/balance`, `/balance/`) has no
/// segments to capture and is a router miss (404).
///
/// # Returns
///
/// * `Result<Json<BalanceResponse>, AppError>` - `{"status":"OK","balance":..,"expiry":..}`
///   or an empty-bodied 400/500.
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(params): Path<String>,
) -> Result<Json<BalanceResponse>, AppError> {
    let (phone, circle) = params
        .split_once('/')
        .filter(|(_, circle)| !circle.contains('/'))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "expected /balance/{{phone}}/{{circle}}, got '{}'",
                params
            ))
        })?;
    tracing::info!("GET /balance - phone: {}, circle: {}", phone, circle);

    let response = state.service.handle(phone, circle).await?;
    Ok(Json(response))
}
