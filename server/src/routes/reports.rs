use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use medifind_common::medicine::{MedicineId, PricePoint};

use super::params::{parse_id, parse_limit, LimitParams};
use crate::catalog::PharmacyPrice;
use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_POPULAR_LIMIT: usize = 10;

#[derive(Serialize)]
pub struct PriceTrendResponse {
    pub medicine_id: MedicineId,
    pub medicine_name: String,
    pub price_history: Vec<PricePoint>,
    pub current_price: f64,
}

pub async fn price_trends(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PriceTrendResponse>> {
    let medicine = state
        .catalog
        .medicine(MedicineId(parse_id(&id, "Medicine")?))?;
    Ok(Json(PriceTrendResponse {
        medicine_id: medicine.id,
        price_history: medicine.trend_history(),
        current_price: medicine.price,
        medicine_name: medicine.name,
    }))
}

#[derive(Serialize)]
pub struct PopularMedicine {
    pub id: MedicineId,
    pub name: String,
    pub reviews: u32,
    pub rating: f32,
    pub category: Option<String>,
    pub price: f64,
}

#[derive(Serialize)]
pub struct PopularResponse {
    pub report_type: &'static str,
    pub medicines: Vec<PopularMedicine>,
    pub generated_at: DateTime<Utc>,
}

pub async fn popular_medicines(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> ApiResult<Json<PopularResponse>> {
    let Query(params) = params?;
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_POPULAR_LIMIT)?;
    let medicines = state
        .catalog
        .popular(limit)?
        .into_iter()
        .map(|m| PopularMedicine {
            id: m.id,
            reviews: m.reviews,
            rating: m.rating,
            category: m.category.into_iter().next(),
            price: m.price,
            name: m.name,
        })
        .collect();
    Ok(Json(PopularResponse {
        report_type: "popular_medicines",
        medicines,
        generated_at: Utc::now(),
    }))
}

#[derive(Serialize)]
pub struct BestPricesResponse {
    pub medicine_id: MedicineId,
    pub medicine_name: String,
    pub best_price: Option<PharmacyPrice>,
    pub prices: Vec<PharmacyPrice>,
    pub generated_at: DateTime<Utc>,
}

pub async fn best_prices(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<BestPricesResponse>> {
    let medicine = state
        .catalog
        .medicine(MedicineId(parse_id(&id, "Medicine")?))?;
    let prices = state.catalog.best_prices(&medicine)?;
    Ok(Json(BestPricesResponse {
        medicine_id: medicine.id,
        medicine_name: medicine.name,
        best_price: prices.first().cloned(),
        prices,
        generated_at: Utc::now(),
    }))
}
