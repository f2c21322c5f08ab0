use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use travelml_core::domain::{DateWindowQuery, DateWindowResult, DealQuery, DealResult};
use travelml_core::predict;

pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/predict/best-date-window", post(best_date_window))
        .route("/predict/option-recommendation", post(option_recommendation))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

/// Request body that failed to decode. Keeps axum's status (422 for schema
/// mismatches, 400 for broken JSON, 415 for a wrong content type).
#[derive(Debug)]
struct BadRequest(JsonRejection);

impl IntoResponse for BadRequest {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let detail = self.0.body_text();
        tracing::warn!(%status, %detail, "rejected malformed prediction request");
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

async fn best_date_window(
    payload: Result<Json<DateWindowQuery>, JsonRejection>,
) -> Result<Json<DateWindowResult>, BadRequest> {
    let Json(query) = payload.map_err(BadRequest)?;
    let result = predict::recommend(&query);

    tracing::debug!(
        origin = %query.origin,
        destination = %query.destination,
        departure = %result.recommended_departure_date,
        confidence = result.confidence,
        "best-date-window"
    );

    Ok(Json(result))
}

async fn option_recommendation(
    payload: Result<Json<DealQuery>, JsonRejection>,
) -> Result<Json<DealResult>, BadRequest> {
    let Json(query) = payload.map_err(BadRequest)?;
    let result = predict::evaluate(&query);

    tracing::debug!(
        price = query.price,
        max_budget = ?query.max_budget,
        is_good_deal = result.is_good_deal,
        "option-recommendation"
    );

    Ok(Json(result))
}
