//! API route handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use std::collections::BTreeMap;

use crate::api::dto::{AvailableDatesQuery, CalculateRequest, CalculateResponse, HealthResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::models::{DateStatus, Region};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/prefectures", get(list_prefectures))
        .route("/available_dates", get(available_dates))
        .route("/calculate", post(calculate))
        .with_state(state)
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

pub async fn list_prefectures(State(state): State<AppState>) -> ApiResult<Json<Vec<Region>>> {
    Ok(Json(state.calculator.list_regions().await?))
}

pub async fn available_dates(
    State(state): State<AppState>,
    query: Result<Query<AvailableDatesQuery>, QueryRejection>,
) -> ApiResult<Json<BTreeMap<String, DateStatus>>> {
    let Query(query) = query?;
    Ok(Json(
        state.calculator.list_available_dates(query.pref_id).await?,
    ))
}

pub async fn calculate(
    State(state): State<AppState>,
    request: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<Json<CalculateResponse>> {
    let Json(request) = request?;
    let calculation = state
        .calculator
        .calculate_request(
            request.prefecture_id,
            &request.target_date,
            &request.period_type,
        )
        .await?;
    Ok(Json(calculation.into()))
}
