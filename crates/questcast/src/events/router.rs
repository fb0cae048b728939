use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

use crate::scoring::{self, DriveBreakdown, FactorInputs, ModelParams, Prediction, SuccessBand};

use super::domain::EventId;
use super::repository::PredictionEventStore;
use super::service::{PredictionLogError, PredictionLogService};

/// Router builder exposing HTTP endpoints for prediction logging, outcome
/// recording, listings, and stateless scoring.
pub fn prediction_router<S>(service: Arc<PredictionLogService<S>>) -> Router
where
    S: PredictionEventStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/predictions",
            post(submit_handler::<S>).get(all_predictions_handler::<S>),
        )
        .route(
            "/api/v1/predictions/:event_id/outcome",
            post(record_outcome_handler::<S>),
        )
        .route(
            "/api/v1/predictions/user/:user_hash",
            get(user_predictions_handler::<S>),
        )
        .route("/api/v1/score", post(score_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPredictionRequest {
    pub user_hash: String,
    pub inputs: FactorInputs,
    pub model_params: ModelParams,
    pub prediction: Prediction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOutcomeRequest {
    pub action_taken: bool,
    pub time_delta: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub inputs: FactorInputs,
    /// Optional; defaults to `ModelParams::for_mood(inputs.mood)`.
    #[serde(default)]
    pub model_params: Option<ModelParams>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub band: &'static str,
    #[serde(flatten)]
    pub breakdown: DriveBreakdown,
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<PredictionLogService<S>>>,
    payload: Result<axum::Json<SubmitPredictionRequest>, JsonRejection>,
) -> Response
where
    S: PredictionEventStore + 'static,
{
    // Missing fields or wrong types surface here as a ValidationError.
    let axum::Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(PredictionLogError::Validation(rejection.body_text()));
        }
    };

    match service.submit(
        request.user_hash,
        request.inputs,
        request.model_params,
        request.prediction,
    ) {
        Ok(event_id) => {
            let body = json!({ "eventId": event_id });
            (StatusCode::CREATED, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_outcome_handler<S>(
    State(service): State<Arc<PredictionLogService<S>>>,
    Path(event_id): Path<String>,
    payload: Result<axum::Json<RecordOutcomeRequest>, JsonRejection>,
) -> Response
where
    S: PredictionEventStore + 'static,
{
    let axum::Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(PredictionLogError::Validation(rejection.body_text()));
        }
    };

    let id = EventId(event_id);
    match service.record_outcome(&id, request.action_taken, request.time_delta) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn user_predictions_handler<S>(
    State(service): State<Arc<PredictionLogService<S>>>,
    Path(user_hash): Path<String>,
) -> Response
where
    S: PredictionEventStore + 'static,
{
    match service.predictions_for_user(&user_hash) {
        Ok(events) => (StatusCode::OK, axum::Json(events)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn all_predictions_handler<S>(
    State(service): State<Arc<PredictionLogService<S>>>,
) -> Response
where
    S: PredictionEventStore + 'static,
{
    match service.all_predictions() {
        Ok(events) => (StatusCode::OK, axum::Json(events)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler(
    payload: Result<axum::Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let axum::Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(PredictionLogError::Validation(rejection.body_text()));
        }
    };

    let params = request
        .model_params
        .unwrap_or_else(|| ModelParams::for_mood(request.inputs.mood));
    let breakdown = scoring::score_detailed(&request.inputs, &params);
    let band = SuccessBand::from_probability(breakdown.prediction.probability);

    (
        StatusCode::OK,
        axum::Json(ScoreResponse {
            band: band.label(),
            breakdown,
        }),
    )
        .into_response()
}

// Status mapping lives on AppError so every surface reports errors the same
// way.
fn error_response(error: PredictionLogError) -> Response {
    AppError::from(error).into_response()
}
