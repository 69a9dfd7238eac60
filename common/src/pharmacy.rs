use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::location::GeoLocation;
use crate::medicine::MedicineId;

/// Catalog identifier of a pharmacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PharmacyId(pub u32);

impl std::fmt::Display for PharmacyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pharmacy. Immutable once seeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pharmacy {
    pub id: PharmacyId,
    pub name: String,
    pub location: String,
    pub phone: String,
    pub address: String,
    pub hours: String,
    pub coordinates: GeoLocation,
    pub delivery_radius_km: f64,
}

impl Pharmacy {
    /// Case-insensitive match against the location label or the street address.
    pub fn matches_location(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.location.to_lowercase().contains(&needle)
            || self.address.to_lowercase().contains(&needle)
    }
}

/// Stock and shelf price of one medicine at one pharmacy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub pharmacy_id: PharmacyId,
    pub medicine_id: MedicineId,
    pub stock: u32,
    pub price: f64,
    pub updated_at: DateTime<Utc>,
}

impl InventoryEntry {
    pub fn stock_label(&self) -> &'static str {
        if self.stock > 0 {
            "in-stock"
        } else {
            "out-of-stock"
        }
    }
}
