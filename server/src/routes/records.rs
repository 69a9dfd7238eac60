use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medifind_common::order::{order_total, Order, OrderId, OrderLine, OrderStatus};
use medifind_common::pharmacy::PharmacyId;
use medifind_common::records::{
    Consultation, ConsultationId, ConsultationStatus, Prescription, PrescriptionId,
    PrescriptionStatus, DEFAULT_CONSULTATION_TYPE,
};

use super::params::parse_id;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ─── Prescriptions ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct PrescriptionRequest {
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub medicines_list: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct PrescriptionCreated {
    pub success: bool,
    pub prescription: Prescription,
    pub message: &'static str,
}

pub async fn upload_prescription(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PrescriptionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PrescriptionCreated>)> {
    let Json(req) = payload?;
    let prescription = Prescription {
        id: PrescriptionId(state.repo.next_id()),
        patient_name: req.patient_name,
        doctor_name: req.doctor_name,
        medicines_list: req.medicines_list,
        notes: req.notes,
        uploaded_at: Utc::now(),
        status: PrescriptionStatus::Pending,
    };
    state.repo.insert_prescription(prescription.clone())?;
    tracing::info!(prescription_id = prescription.id.0, "prescription uploaded");

    Ok((
        StatusCode::CREATED,
        Json(PrescriptionCreated {
            success: true,
            prescription,
            message: "Prescription uploaded successfully",
        }),
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct PrescriptionParams {
    pub patient_name: Option<String>,
}

#[derive(Serialize)]
pub struct PrescriptionsResponse {
    pub prescriptions: Vec<Prescription>,
    pub total: usize,
}

pub async fn list_prescriptions(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PrescriptionParams>, QueryRejection>,
) -> ApiResult<Json<PrescriptionsResponse>> {
    let Query(params) = params?;
    let mut prescriptions = state.repo.prescriptions()?;
    if let Some(name) = required(params.patient_name) {
        prescriptions.retain(|p| p.patient_matches(&name));
    }
    Ok(Json(PrescriptionsResponse {
        total: prescriptions.len(),
        prescriptions,
    }))
}

// ─── Consultations ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ConsultationRequest {
    pub patient_name: Option<String>,
    pub phone: Option<String>,
    pub preferred_time: Option<String>,
    pub consultation_type: Option<String>,
    pub query: Option<String>,
}

#[derive(Serialize)]
pub struct ConsultationCreated {
    pub success: bool,
    pub consultation: Consultation,
    pub message: &'static str,
}

pub async fn book_consultation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConsultationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ConsultationCreated>)> {
    let Json(req) = payload?;
    let (Some(patient_name), Some(phone)) = (required(req.patient_name), required(req.phone))
    else {
        return Err(ApiError::validation("Patient name and phone are required"));
    };

    let consultation = Consultation {
        id: ConsultationId(state.repo.next_id()),
        patient_name,
        phone,
        preferred_time: req.preferred_time,
        consultation_type: required(req.consultation_type)
            .unwrap_or_else(|| DEFAULT_CONSULTATION_TYPE.to_string()),
        query: req.query,
        status: ConsultationStatus::Scheduled,
        booked_at: Utc::now(),
    };
    state.repo.insert_consultation(consultation.clone())?;
    tracing::info!(consultation_id = consultation.id.0, "consultation booked");

    Ok((
        StatusCode::CREATED,
        Json(ConsultationCreated {
            success: true,
            consultation,
            message: "Consultation booked successfully",
        }),
    ))
}

#[derive(Serialize)]
pub struct ConsultationsResponse {
    pub consultations: Vec<Consultation>,
    pub total: usize,
}

pub async fn list_consultations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ConsultationsResponse>> {
    let consultations = state.repo.consultations()?;
    Ok(Json(ConsultationsResponse {
        total: consultations.len(),
        consultations,
    }))
}

// ─── Orders ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct OrderRequest {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub medicines: Option<Vec<OrderLine>>,
    pub pharmacy_id: Option<PharmacyId>,
    pub delivery_option: Option<String>,
}

#[derive(Serialize)]
pub struct OrderCreated {
    pub success: bool,
    pub order: Order,
    pub message: &'static str,
}

pub async fn create_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OrderCreated>)> {
    let Json(req) = payload?;
    let (Some(customer_name), Some(phone), Some(lines)) = (
        required(req.customer_name),
        required(req.phone),
        req.medicines.filter(|m| !m.is_empty()),
    ) else {
        return Err(ApiError::validation(
            "Customer details and medicines are required",
        ));
    };
    if lines.iter().any(|l| l.quantity == 0) {
        return Err(ApiError::validation("Quantities must be at least 1"));
    }
    if let Some(pharmacy_id) = req.pharmacy_id {
        state.catalog.pharmacy(pharmacy_id)?;
    }

    let catalog = state.repo.medicines()?;
    let total_amount = order_total(&lines, |id| catalog.iter().find(|m| m.id == id))
        .map_err(|id| ApiError::not_found(format!("Medicine {id} not found")))?;

    let created_at = Utc::now();
    let order = Order {
        id: OrderId(state.repo.next_id()),
        customer_name,
        phone,
        address: req.address,
        medicines: lines,
        pharmacy_id: req.pharmacy_id,
        delivery_option: required(req.delivery_option).unwrap_or_else(|| "standard".to_string()),
        total_amount,
        status: OrderStatus::Confirmed,
        created_at,
        estimated_delivery: Order::estimated_delivery_for(created_at),
    };
    state.repo.insert_order(order.clone())?;
    tracing::info!(order_id = order.id.0, total_amount, "order placed");

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            success: true,
            order,
            message: "Order placed successfully",
        }),
    ))
}

pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let id = OrderId(parse_id(&id, "Order")?);
    state
        .repo
        .order(id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Order not found"))
}

// ─── Contact ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

pub async fn contact(payload: Result<Json<ContactRequest>, JsonRejection>) -> ApiResult<Json<ContactResponse>> {
    let Json(req) = payload?;
    let (Some(name), Some(email), Some(message)) =
        (required(req.name), required(req.email), required(req.message))
    else {
        return Err(ApiError::validation("Name, email, and message are required"));
    };

    tracing::info!(%name, %email, subject = ?req.subject, %message, "contact form submission");
    Ok(Json(ContactResponse {
        success: true,
        message: "Your message has been sent successfully. We will get back to you soon.",
        timestamp: Utc::now(),
    }))
}
