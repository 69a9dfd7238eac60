use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use medifind_common::identity::AdminProfile;
use medifind_common::medicine::MedicineId;
use medifind_common::pharmacy::{Pharmacy, PharmacyId};

use super::params::parse_id;
use crate::catalog::{InventoryItem, InventoryRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub admin: AdminProfile,
    pub message: &'static str,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(ApiError::validation("Username and password are required"));
    };

    let admin = state
        .repo
        .admin(&username)?
        .filter(|a| a.verify_password(&password))
        .ok_or_else(|| {
            tracing::warn!(%username, "admin login rejected");
            ApiError::Unauthorized("Invalid credentials".to_string())
        })?;

    tracing::info!(%username, pharmacy_id = admin.pharmacy_id.0, "admin logged in");
    Ok(Json(LoginResponse {
        success: true,
        admin: admin.profile(),
        message: "Login successful",
    }))
}

#[derive(Serialize)]
pub struct InventoryResponse {
    pub pharmacy: Pharmacy,
    pub inventory: Vec<InventoryItem>,
    pub total_items: usize,
}

pub async fn inventory(
    State(state): State<Arc<AppState>>,
    Path(pharmacy_id): Path<String>,
) -> ApiResult<Json<InventoryResponse>> {
    let pharmacy = state
        .catalog
        .pharmacy(PharmacyId(parse_id(&pharmacy_id, "Pharmacy")?))?;
    let inventory = state.catalog.inventory(&pharmacy)?;
    Ok(Json(InventoryResponse {
        pharmacy,
        total_items: inventory.len(),
        inventory,
    }))
}

#[derive(Serialize)]
pub struct UpdatedMedicine {
    pub id: MedicineId,
    pub name: String,
    pub price: f64,
    pub pharmacy: String,
}

#[derive(Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub message: &'static str,
    pub medicine: UpdatedMedicine,
    pub alerts_triggered: usize,
}

pub async fn update_inventory(
    State(state): State<Arc<AppState>>,
    Path((pharmacy_id, medicine_id)): Path<(String, String)>,
    payload: Result<Json<InventoryRequest>, JsonRejection>,
) -> ApiResult<Json<UpdateResponse>> {
    let pharmacy_id = PharmacyId(parse_id(&pharmacy_id, "Pharmacy")?);
    let medicine_id = MedicineId(parse_id(&medicine_id, "Medicine")?);
    let Json(req) = payload?;

    let change = state
        .catalog
        .update_inventory(pharmacy_id, medicine_id, req)?;

    Ok(Json(UpdateResponse {
        success: true,
        message: "Inventory updated successfully",
        medicine: UpdatedMedicine {
            id: change.medicine.id,
            name: change.medicine.name,
            price: change.medicine.price,
            pharmacy: change.pharmacy.name,
        },
        alerts_triggered: change.notifications.len(),
    }))
}
