//! Read-side catalog queries and inventory updates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medifind_common::alert::PriceAlertNotification;
use medifind_common::currency::round_paise;
use medifind_common::location::{delivery_hours, format_distance, GeoLocation};
use medifind_common::medicine::{Medicine, MedicineId};
use medifind_common::pharmacy::{Pharmacy, PharmacyId};
use medifind_common::search::{self, SearchQuery};

use crate::alerts::AlertService;
use crate::distance::{distance_to, DistanceEstimator};
use crate::error::{ApiError, ApiResult};
use crate::repository::{CatalogRepository, InventoryUpdate};

/// One pharmacy's offer for a medicine.
#[derive(Debug, Clone, Serialize)]
pub struct PharmacyAvailability {
    pub pharmacy: String,
    pub pharmacy_info: Pharmacy,
    pub stock: &'static str,
    pub price: f64,
    pub distance: String,
    pub distance_km: f64,
    #[serde(rename = "deliveryTime")]
    pub delivery_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PharmacyPrice {
    pub pharmacy_id: PharmacyId,
    pub pharmacy_name: String,
    pub price: f64,
    pub distance: String,
}

/// A medicine as listed in one pharmacy's inventory.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryItem {
    #[serde(flatten)]
    pub medicine: Medicine,
    pub current_stock: u32,
    pub shelf_price: f64,
    pub last_updated: DateTime<Utc>,
}

/// Body of `PUT /api/admin/inventory/{pharmacyId}/medicine/{medicineId}`.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryRequest {
    pub price: Option<f64>,
    pub stock: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct InventoryChange {
    pub medicine: Medicine,
    pub pharmacy: Pharmacy,
    pub notifications: Vec<PriceAlertNotification>,
}

#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
    estimator: Arc<dyn DistanceEstimator>,
    alerts: AlertService,
}

impl CatalogService {
    pub fn new(
        repo: Arc<dyn CatalogRepository>,
        estimator: Arc<dyn DistanceEstimator>,
        alerts: AlertService,
    ) -> Self {
        Self {
            repo,
            estimator,
            alerts,
        }
    }

    pub fn search(&self, query: &SearchQuery, user: Option<GeoLocation>) -> ApiResult<Vec<Medicine>> {
        let catalog = self.repo.medicines()?;
        let pharmacies = self.repo.pharmacies()?;
        let nearest = |m: &Medicine| {
            pharmacies
                .iter()
                .filter(|p| m.is_stocked_at(&p.name))
                .map(|p| distance_to(user, p, self.estimator.as_ref()))
                .min_by(f64::total_cmp)
        };
        Ok(search::search(&catalog, query, nearest))
    }

    pub fn popular(&self, limit: usize) -> ApiResult<Vec<Medicine>> {
        Ok(search::popular(&self.repo.medicines()?, limit))
    }

    pub fn medicine(&self, id: MedicineId) -> ApiResult<Medicine> {
        self.repo
            .medicine(id)?
            .ok_or_else(|| ApiError::not_found("Medicine not found"))
    }

    pub fn medicines(&self, ids: &[MedicineId]) -> ApiResult<Vec<Medicine>> {
        Ok(self
            .repo
            .medicines()?
            .into_iter()
            .filter(|m| ids.contains(&m.id))
            .collect())
    }

    pub fn pharmacy(&self, id: PharmacyId) -> ApiResult<Pharmacy> {
        self.repo
            .pharmacy(id)?
            .ok_or_else(|| ApiError::not_found("Pharmacy not found"))
    }

    pub fn pharmacies(&self, location: Option<&str>) -> ApiResult<Vec<Pharmacy>> {
        let all = self.repo.pharmacies()?;
        Ok(match location.filter(|l| !l.is_empty()) {
            Some(loc) => all.into_iter().filter(|p| p.matches_location(loc)).collect(),
            None => all,
        })
    }

    /// Medicines stocked at `pharmacy`.
    pub fn stocked_at(&self, pharmacy: &Pharmacy) -> ApiResult<Vec<Medicine>> {
        Ok(self
            .repo
            .medicines()?
            .into_iter()
            .filter(|m| m.is_stocked_at(&pharmacy.name))
            .collect())
    }

    /// Stocking pharmacies that exist in the catalog, in listing order.
    fn stockists(&self, medicine: &Medicine) -> ApiResult<Vec<Pharmacy>> {
        let mut found = Vec::with_capacity(medicine.pharmacies.len());
        for name in &medicine.pharmacies {
            match self.repo.pharmacy_by_name(name)? {
                Some(p) => found.push(p),
                None => tracing::warn!(medicine = %medicine.name, pharmacy = %name, "unknown stockist"),
            }
        }
        Ok(found)
    }

    pub fn availability(
        &self,
        medicine: &Medicine,
        user: Option<GeoLocation>,
    ) -> ApiResult<Vec<PharmacyAvailability>> {
        self.stockists(medicine)?
            .into_iter()
            .map(|p| -> ApiResult<PharmacyAvailability> {
                let entry = self.repo.inventory_entry(p.id, medicine.id)?;
                let km = distance_to(user, &p, self.estimator.as_ref());
                Ok(PharmacyAvailability {
                    pharmacy: p.name.clone(),
                    stock: entry.as_ref().map_or("out-of-stock", |e| e.stock_label()),
                    price: entry.as_ref().map_or(medicine.price, |e| e.price),
                    distance: format_distance(km),
                    distance_km: round_paise(km),
                    delivery_time: format!("{} hours", delivery_hours(km)),
                    pharmacy_info: p,
                })
            })
            .collect()
    }

    /// Shelf prices across stockists, cheapest first. Ties keep pharmacy id order.
    pub fn best_prices(&self, medicine: &Medicine) -> ApiResult<Vec<PharmacyPrice>> {
        let mut prices = self
            .stockists(medicine)?
            .into_iter()
            .map(|p| -> ApiResult<PharmacyPrice> {
                let price = self
                    .repo
                    .inventory_entry(p.id, medicine.id)?
                    .map_or(medicine.price, |e| e.price);
                Ok(PharmacyPrice {
                    pharmacy_id: p.id,
                    distance: format_distance(self.estimator.estimate_km(&p)),
                    pharmacy_name: p.name,
                    price: round_paise(price),
                })
            })
            .collect::<ApiResult<Vec<_>>>()?;
        prices.sort_by(|a, b| {
            a.price
                .total_cmp(&b.price)
                .then(a.pharmacy_id.cmp(&b.pharmacy_id))
        });
        Ok(prices)
    }

    pub fn inventory(&self, pharmacy: &Pharmacy) -> ApiResult<Vec<InventoryItem>> {
        self.stocked_at(pharmacy)?
            .into_iter()
            .map(|m| -> ApiResult<InventoryItem> {
                let entry = self.repo.inventory_entry(pharmacy.id, m.id)?;
                Ok(InventoryItem {
                    current_stock: entry.as_ref().map_or(0, |e| e.stock),
                    shelf_price: entry.as_ref().map_or(m.price, |e| e.price),
                    last_updated: entry.map_or_else(Utc::now, |e| e.updated_at),
                    medicine: m,
                })
            })
            .collect()
    }

    /// Apply an admin inventory update, then evaluate price alerts if the price moved.
    pub fn update_inventory(
        &self,
        pharmacy_id: PharmacyId,
        medicine_id: MedicineId,
        req: InventoryRequest,
    ) -> ApiResult<InventoryChange> {
        let pharmacy = self.pharmacy(pharmacy_id)?;
        let medicine = self.medicine(medicine_id)?;
        if !medicine.is_stocked_at(&pharmacy.name) {
            return Err(ApiError::validation("Medicine not available at this pharmacy"));
        }
        if let Some(price) = req.price {
            if !price.is_finite() || price <= 0.0 {
                return Err(ApiError::validation("Price must be a positive number"));
            }
        }

        let outcome = self
            .repo
            .update_inventory(
                pharmacy_id,
                medicine_id,
                InventoryUpdate {
                    price: req.price,
                    stock: req.stock,
                },
                Utc::now(),
            )?
            .ok_or_else(|| ApiError::not_found("Medicine not found"))?;

        tracing::info!(
            pharmacy = %pharmacy.name,
            medicine = %outcome.medicine.name,
            old_price = ?outcome.old_price,
            price = outcome.medicine.price,
            stock = ?req.stock,
            "inventory updated"
        );

        let notifications = match outcome.old_price {
            Some(old_price) => self.alerts.on_price_change(&outcome.medicine, old_price)?,
            None => Vec::new(),
        };

        Ok(InventoryChange {
            medicine: outcome.medicine,
            pharmacy,
            notifications,
        })
    }
}
