use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::medicine::{Medicine, MedicineId};
use crate::pharmacy::PharmacyId;

/// Unique order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

/// Hours between placing an order and its estimated delivery.
pub const DELIVERY_ESTIMATE_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub medicine_id: MedicineId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Confirmed,
}

/// An order placed by a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub medicines: Vec<OrderLine>,
    pub pharmacy_id: Option<PharmacyId>,
    pub delivery_option: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
}

impl Order {
    pub fn estimated_delivery_for(created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + Duration::hours(DELIVERY_ESTIMATE_HOURS)
    }
}

/// Sum of `price * quantity` over `lines`. Returns the first line whose
/// medicine is missing from `priced` as the error.
pub fn order_total<'a>(
    lines: &[OrderLine],
    mut priced: impl FnMut(MedicineId) -> Option<&'a Medicine>,
) -> Result<f64, MedicineId> {
    lines.iter().try_fold(0.0, |total, line| {
        let medicine = priced(line.medicine_id).ok_or(line.medicine_id)?;
        Ok(total + medicine.price * f64::from(line.quantity))
    })
}
