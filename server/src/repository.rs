//! Storage seam for the catalog and everything recorded against it.
//!
//! Handlers and services only see [`CatalogRepository`]; the in-memory
//! implementation below is what the server runs with.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use medifind_common::alert::{AlertId, PriceAlert};
use medifind_common::identity::AdminAccount;
use medifind_common::interaction::InteractionRule;
use medifind_common::medicine::{Medicine, MedicineId};
use medifind_common::order::{Order, OrderId};
use medifind_common::pharmacy::{InventoryEntry, Pharmacy, PharmacyId};
use medifind_common::records::{Consultation, Prescription};
use medifind_common::trend::DiseaseTrend;

use crate::seed::Seed;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0} store lock poisoned")]
    Poisoned(&'static str),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Changes requested by an inventory update. `None` leaves a field alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryUpdate {
    pub price: Option<f64>,
    pub stock: Option<u32>,
}

/// State of a medicine after an inventory update.
#[derive(Debug, Clone)]
pub struct InventoryOutcome {
    pub medicine: Medicine,
    /// Price before the update, present only when the update set a price.
    pub old_price: Option<f64>,
}

pub trait CatalogRepository: Send + Sync {
    /// Next id from the sequence shared by every record kind.
    fn next_id(&self) -> u32;

    fn medicines(&self) -> RepoResult<Vec<Medicine>>;
    fn medicine(&self, id: MedicineId) -> RepoResult<Option<Medicine>>;
    fn pharmacies(&self) -> RepoResult<Vec<Pharmacy>>;
    fn pharmacy(&self, id: PharmacyId) -> RepoResult<Option<Pharmacy>>;
    fn pharmacy_by_name(&self, name: &str) -> RepoResult<Option<Pharmacy>>;
    fn disease_trends(&self) -> RepoResult<Vec<DiseaseTrend>>;
    fn interaction_rules(&self) -> RepoResult<Vec<InteractionRule>>;
    fn admin(&self, username: &str) -> RepoResult<Option<AdminAccount>>;

    fn inventory_entry(
        &self,
        pharmacy: PharmacyId,
        medicine: MedicineId,
    ) -> RepoResult<Option<InventoryEntry>>;
    /// Apply `update` to the medicine and to its entry at `pharmacy` in one step.
    /// Returns `None` if the medicine does not exist.
    fn update_inventory(
        &self,
        pharmacy: PharmacyId,
        medicine: MedicineId,
        update: InventoryUpdate,
        at: DateTime<Utc>,
    ) -> RepoResult<Option<InventoryOutcome>>;

    fn insert_alert(&self, alert: PriceAlert) -> RepoResult<()>;
    fn alerts(&self, medicine: Option<MedicineId>) -> RepoResult<Vec<PriceAlert>>;
    fn deactivate_alert(&self, id: AlertId) -> RepoResult<Option<PriceAlert>>;

    fn insert_order(&self, order: Order) -> RepoResult<()>;
    fn order(&self, id: OrderId) -> RepoResult<Option<Order>>;
    fn insert_prescription(&self, prescription: Prescription) -> RepoResult<()>;
    fn prescriptions(&self) -> RepoResult<Vec<Prescription>>;
    fn insert_consultation(&self, consultation: Consultation) -> RepoResult<()>;
    fn consultations(&self) -> RepoResult<Vec<Consultation>>;
}

#[derive(Default)]
struct Tables {
    medicines: Vec<Medicine>,
    pharmacies: Vec<Pharmacy>,
    inventory: Vec<InventoryEntry>,
    trends: Vec<DiseaseTrend>,
    interaction_rules: Vec<InteractionRule>,
    admins: Vec<AdminAccount>,
    alerts: Vec<PriceAlert>,
    orders: Vec<Order>,
    prescriptions: Vec<Prescription>,
    consultations: Vec<Consultation>,
}

/// Process-local catalog. Lost on restart.
pub struct InMemoryCatalog {
    tables: RwLock<Tables>,
    next_id: AtomicU32,
}

impl InMemoryCatalog {
    pub fn new(seed: Seed) -> Self {
        let first_id = seed.medicines.iter().map(|m| m.id.0).max().unwrap_or(0) + 1;
        Self {
            tables: RwLock::new(Tables {
                medicines: seed.medicines,
                pharmacies: seed.pharmacies,
                inventory: seed.inventory,
                trends: seed.trends,
                interaction_rules: seed.interaction_rules,
                admins: seed.admins,
                ..Tables::default()
            }),
            next_id: AtomicU32::new(first_id),
        }
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| RepositoryError::Poisoned("catalog"))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| RepositoryError::Poisoned("catalog"))
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn next_id(&self) -> u32 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn medicines(&self) -> RepoResult<Vec<Medicine>> {
        Ok(self.read()?.medicines.clone())
    }

    fn medicine(&self, id: MedicineId) -> RepoResult<Option<Medicine>> {
        Ok(self.read()?.medicines.iter().find(|m| m.id == id).cloned())
    }

    fn pharmacies(&self) -> RepoResult<Vec<Pharmacy>> {
        Ok(self.read()?.pharmacies.clone())
    }

    fn pharmacy(&self, id: PharmacyId) -> RepoResult<Option<Pharmacy>> {
        Ok(self.read()?.pharmacies.iter().find(|p| p.id == id).cloned())
    }

    fn pharmacy_by_name(&self, name: &str) -> RepoResult<Option<Pharmacy>> {
        Ok(self
            .read()?
            .pharmacies
            .iter()
            .find(|p| p.name == name)
            .cloned())
    }

    fn disease_trends(&self) -> RepoResult<Vec<DiseaseTrend>> {
        Ok(self.read()?.trends.clone())
    }

    fn interaction_rules(&self) -> RepoResult<Vec<InteractionRule>> {
        Ok(self.read()?.interaction_rules.clone())
    }

    fn admin(&self, username: &str) -> RepoResult<Option<AdminAccount>> {
        Ok(self
            .read()?
            .admins
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    fn inventory_entry(
        &self,
        pharmacy: PharmacyId,
        medicine: MedicineId,
    ) -> RepoResult<Option<InventoryEntry>> {
        Ok(self
            .read()?
            .inventory
            .iter()
            .find(|e| e.pharmacy_id == pharmacy && e.medicine_id == medicine)
            .cloned())
    }

    fn update_inventory(
        &self,
        pharmacy: PharmacyId,
        medicine: MedicineId,
        update: InventoryUpdate,
        at: DateTime<Utc>,
    ) -> RepoResult<Option<InventoryOutcome>> {
        let mut tables = self.write()?;
        let tables = &mut *tables;

        let Some(record) = tables.medicines.iter_mut().find(|m| m.id == medicine) else {
            return Ok(None);
        };
        let old_price = update
            .price
            .map(|price| record.reprice(price, at.date_naive()));

        let entry = match tables
            .inventory
            .iter()
            .position(|e| e.pharmacy_id == pharmacy && e.medicine_id == medicine)
        {
            Some(idx) => &mut tables.inventory[idx],
            None => {
                tables.inventory.push(InventoryEntry {
                    pharmacy_id: pharmacy,
                    medicine_id: medicine,
                    stock: 0,
                    price: record.price,
                    updated_at: at,
                });
                let last = tables.inventory.len() - 1;
                &mut tables.inventory[last]
            }
        };
        if let Some(price) = update.price {
            entry.price = price;
        }
        if let Some(stock) = update.stock {
            entry.stock = stock;
        }
        entry.updated_at = at;

        Ok(Some(InventoryOutcome {
            medicine: record.clone(),
            old_price,
        }))
    }

    fn insert_alert(&self, alert: PriceAlert) -> RepoResult<()> {
        self.write()?.alerts.push(alert);
        Ok(())
    }

    fn alerts(&self, medicine: Option<MedicineId>) -> RepoResult<Vec<PriceAlert>> {
        Ok(self
            .read()?
            .alerts
            .iter()
            .filter(|a| medicine.map_or(true, |id| a.medicine_id == id))
            .cloned()
            .collect())
    }

    fn deactivate_alert(&self, id: AlertId) -> RepoResult<Option<PriceAlert>> {
        let mut tables = self.write()?;
        Ok(tables.alerts.iter_mut().find(|a| a.id == id).map(|a| {
            a.active = false;
            a.clone()
        }))
    }

    fn insert_order(&self, order: Order) -> RepoResult<()> {
        self.write()?.orders.push(order);
        Ok(())
    }

    fn order(&self, id: OrderId) -> RepoResult<Option<Order>> {
        Ok(self.read()?.orders.iter().find(|o| o.id == id).cloned())
    }

    fn insert_prescription(&self, prescription: Prescription) -> RepoResult<()> {
        self.write()?.prescriptions.push(prescription);
        Ok(())
    }

    fn prescriptions(&self) -> RepoResult<Vec<Prescription>> {
        Ok(self.read()?.prescriptions.clone())
    }

    fn insert_consultation(&self, consultation: Consultation) -> RepoResult<()> {
        self.write()?.consultations.push(consultation);
        Ok(())
    }

    fn consultations(&self) -> RepoResult<Vec<Consultation>> {
        Ok(self.read()?.consultations.clone())
    }
}
