use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medifind_common::medicine::Medicine;
use medifind_common::pharmacy::{Pharmacy, PharmacyId};
use medifind_common::trend::DiseaseTrend;

use super::params::parse_id;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PharmacyParams {
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct PharmaciesResponse {
    pub pharmacies: Vec<Pharmacy>,
    pub total: usize,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PharmacyParams>, QueryRejection>,
) -> ApiResult<Json<PharmaciesResponse>> {
    let Query(params) = params?;
    let pharmacies = state.catalog.pharmacies(params.location.as_deref())?;
    Ok(Json(PharmaciesResponse {
        total: pharmacies.len(),
        pharmacies,
    }))
}

#[derive(Serialize)]
pub struct PharmacyDetail {
    #[serde(flatten)]
    pub pharmacy: Pharmacy,
    pub medicines: Vec<Medicine>,
    pub total_medicines: usize,
}

pub async fn get_pharmacy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PharmacyDetail>> {
    let pharmacy = state
        .catalog
        .pharmacy(PharmacyId(parse_id(&id, "Pharmacy")?))?;
    let medicines = state.catalog.stocked_at(&pharmacy)?;
    Ok(Json(PharmacyDetail {
        pharmacy,
        total_medicines: medicines.len(),
        medicines,
    }))
}

#[derive(Serialize)]
pub struct TrendsResponse {
    pub trends: Vec<DiseaseTrend>,
    pub last_updated: DateTime<Utc>,
}

pub async fn disease_trends(State(state): State<Arc<AppState>>) -> ApiResult<Json<TrendsResponse>> {
    Ok(Json(TrendsResponse {
        trends: state.repo.disease_trends()?,
        last_updated: Utc::now(),
    }))
}
