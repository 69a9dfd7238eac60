use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use medifind_common::alert::{AlertId, PriceAlert};
use medifind_common::medicine::MedicineId;

use super::params::parse_id;
use crate::alerts::AlertRequest;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct AlertResponse {
    pub success: bool,
    pub alert: PriceAlert,
    pub message: &'static str,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AlertRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AlertResponse>)> {
    let Json(req) = payload?;
    let alert = state.alerts.register(req)?;
    Ok((
        StatusCode::CREATED,
        Json(AlertResponse {
            success: true,
            alert,
            message: "Price alert created successfully",
        }),
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertParams {
    pub medicine_id: Option<String>,
}

#[derive(Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<PriceAlert>,
    pub total: usize,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    params: Result<Query<AlertParams>, QueryRejection>,
) -> ApiResult<Json<AlertsResponse>> {
    let Query(params) = params?;
    let medicine = params
        .medicine_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map(MedicineId)
                .map_err(|_| ApiError::validation("medicine_id must be a number"))
        })
        .transpose()?;
    let alerts = state.alerts.list(medicine)?;
    Ok(Json(AlertsResponse {
        total: alerts.len(),
        alerts,
    }))
}

pub async fn deactivate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AlertResponse>> {
    let alert = state.alerts.deactivate(AlertId(parse_id(&id, "Alert")?))?;
    Ok(Json(AlertResponse {
        success: true,
        alert,
        message: "Price alert deactivated",
    }))
}
