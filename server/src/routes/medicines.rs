use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medifind_common::interaction::{find_interactions, Interaction};
use medifind_common::medicine::{Medicine, MedicineId};
use medifind_common::search::{SearchQuery, DEFAULT_CATEGORY_LIMIT, DEFAULT_SEARCH_LIMIT};

use super::params::{parse_f64, parse_id, parse_limit, CoordinateParams, LimitParams};
use crate::catalog::PharmacyAvailability;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    #[serde(rename = "maxDistance")]
    pub max_distance: Option<String>,
    #[serde(flatten)]
    pub coordinates: CoordinateParams,
}

impl SearchParams {
    pub fn to_query(&self) -> ApiResult<SearchQuery> {
        Ok(SearchQuery {
            text: self.q.clone(),
            category: self.category.clone(),
            min_price: parse_f64("minPrice", self.min_price.as_deref())?,
            max_price: parse_f64("maxPrice", self.max_price.as_deref())?,
            location: self.location.clone(),
            max_distance_km: parse_f64("maxDistance", self.max_distance.as_deref())?,
            // Unrecognised sort keys keep catalog order.
            sort: self.sort.as_deref().and_then(|s| s.parse().ok()),
            limit: parse_limit(self.limit.as_deref(), DEFAULT_SEARCH_LIMIT)?,
        })
    }
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub results: Vec<Medicine>,
    pub total: usize,
    pub timestamp: DateTime<Utc>,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Query(params) = params?;
    let query = params.to_query()?;
    let user = params.coordinates.location()?;
    let results = state.catalog.search(&query, user)?;
    tracing::debug!(q = ?params.q, hits = results.len(), "medicine search");

    Ok(Json(SearchResponse {
        query: params.q,
        category: params.category,
        location: params.location,
        total: results.len(),
        results,
        timestamp: Utc::now(),
    }))
}

#[derive(Serialize)]
pub struct CategoryResponse {
    pub category: String,
    pub medicines: Vec<Medicine>,
    pub total: usize,
}

pub async fn by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> ApiResult<Json<CategoryResponse>> {
    let Query(params) = params?;
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_CATEGORY_LIMIT)?;
    let medicines = state
        .catalog
        .search(&SearchQuery::category(&category, limit), None)?;
    Ok(Json(CategoryResponse {
        category,
        total: medicines.len(),
        medicines,
    }))
}

pub async fn get_medicine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Medicine>> {
    let id = MedicineId(parse_id(&id, "Medicine")?);
    Ok(Json(state.catalog.medicine(id)?))
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub medicine_id: MedicineId,
    pub medicine_name: String,
    pub availability: Vec<PharmacyAvailability>,
    pub last_updated: DateTime<Utc>,
}

pub async fn availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    coordinates: Result<Query<CoordinateParams>, QueryRejection>,
) -> ApiResult<Json<AvailabilityResponse>> {
    let Query(coordinates) = coordinates?;
    let id = MedicineId(parse_id(&id, "Medicine")?);
    let medicine = state.catalog.medicine(id)?;
    let availability = state
        .catalog
        .availability(&medicine, coordinates.location()?)?;
    Ok(Json(AvailabilityResponse {
        medicine_id: id,
        medicine_name: medicine.name,
        availability,
        last_updated: Utc::now(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub medicine_ids: Option<Vec<MedicineId>>,
}

#[derive(Serialize)]
pub struct InteractionResponse {
    pub medicines: Vec<Medicine>,
    pub interactions: Vec<Interaction>,
    pub interaction_count: usize,
    pub checked_at: DateTime<Utc>,
}

pub async fn check_interactions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InteractionRequest>, JsonRejection>,
) -> ApiResult<Json<InteractionResponse>> {
    let Json(req) = payload?;
    let ids = req
        .medicine_ids
        .ok_or_else(|| ApiError::validation("Medicine IDs array is required"))?;

    let medicines = state.catalog.medicines(&ids)?;
    let catalog = state.repo.medicines()?;
    let interactions = find_interactions(&state.repo.interaction_rules()?, &ids, &catalog);

    Ok(Json(InteractionResponse {
        medicines,
        interaction_count: interactions.len(),
        interactions,
        checked_at: Utc::now(),
    }))
}
