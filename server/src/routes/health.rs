use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

const FEATURES: [&str; 6] = [
    "medicine_search",
    "pharmacy_availability",
    "price_alerts",
    "realtime_updates",
    "drug_interactions",
    "admin_inventory",
];

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
    pub features: &'static [&'static str],
    pub subscribers: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now(),
        service: "MediFind Backend",
        features: &FEATURES,
        subscribers: state.broadcaster.subscriber_count(),
    })
}
