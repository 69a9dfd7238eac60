//! Demo catalog loaded at startup.

use chrono::{NaiveDate, Utc};

use medifind_common::identity::AdminAccount;
use medifind_common::interaction::{InteractionRule, Severity};
use medifind_common::location::GeoLocation;
use medifind_common::medicine::{Medicine, MedicineId, PricePoint};
use medifind_common::pharmacy::{InventoryEntry, Pharmacy, PharmacyId};
use medifind_common::trend::{DiseaseTrend, TrendDirection};

pub const APOLLO: &str = "Apollo Pharmacy";
pub const MEDPLUS: &str = "MedPlus";
pub const FORTIS: &str = "Fortis Healthcare";

/// Everything the repository starts with.
pub struct Seed {
    pub medicines: Vec<Medicine>,
    pub pharmacies: Vec<Pharmacy>,
    pub inventory: Vec<InventoryEntry>,
    pub trends: Vec<DiseaseTrend>,
    pub interaction_rules: Vec<InteractionRule>,
    pub admins: Vec<AdminAccount>,
}

pub fn demo() -> Seed {
    let medicines = medicines();
    let pharmacies = pharmacies();
    let inventory = inventory(&medicines, &pharmacies);
    Seed {
        medicines,
        pharmacies,
        inventory,
        trends: trends(),
        interaction_rules: interaction_rules(),
        admins: admins(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn medicine(
    id: u32,
    name: &str,
    description: &str,
    composition: &str,
    manufacturer: &str,
    price: f64,
    category: &[&str],
    rating: f32,
    reviews: u32,
    pharmacies: &[&str],
    prescription_required: bool,
) -> Medicine {
    Medicine {
        id: MedicineId(id),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.iter().map(|c| c.to_string()).collect(),
        rating,
        reviews,
        availability: "in-stock".to_string(),
        pharmacies: pharmacies.iter().map(|p| p.to_string()).collect(),
        composition: composition.to_string(),
        manufacturer: manufacturer.to_string(),
        prescription_required,
        price_history: Vec::new(),
    }
}

/// Only Dolo 650 carries recorded history; the rest report a synthetic trend
/// until their first price update.
fn medicines() -> Vec<Medicine> {
    let mut medicines = vec![
        medicine(1, "Dolo 650", "Paracetamol Tablets", "Paracetamol 650mg", "Micro Labs Ltd",
            45.0, &["popular", "fever"], 4.5, 1200, &[APOLLO, MEDPLUS, FORTIS], false),
        medicine(2, "Azithral 500", "Azithromycin Tablets", "Azithromycin 500mg", "Alembic Pharmaceuticals",
            120.0, &["antibiotics"], 4.3, 850, &[APOLLO, MEDPLUS], true),
        medicine(3, "Cetzine 10", "Cetirizine Tablets", "Cetirizine 10mg", "Dr. Reddy's Laboratories",
            28.0, &["allergy", "popular"], 4.4, 980, &[APOLLO, FORTIS], false),
        medicine(4, "Pan 40", "Pantoprazole Tablets", "Pantoprazole 40mg", "Alkem Laboratories",
            155.0, &["digestive"], 4.2, 640, &[MEDPLUS, FORTIS], true),
        medicine(5, "Atorva 10", "Atorvastatin Tablets", "Atorvastatin 10mg", "Zydus Cadila",
            95.0, &["cardiac"], 4.1, 410, &[APOLLO, FORTIS], true),
        medicine(6, "Crocin Advance", "Paracetamol Fast Release Tablets", "Paracetamol 500mg", "GSK",
            32.0, &["popular", "fever"], 4.6, 1500, &[APOLLO, MEDPLUS, FORTIS], false),
        medicine(7, "Allegra 120", "Fexofenadine Tablets", "Fexofenadine 120mg", "Sanofi India",
            210.0, &["allergy"], 4.5, 720, &[MEDPLUS], false),
        medicine(8, "Glycomet 500", "Metformin Tablets", "Metformin 500mg", "USV Ltd",
            38.0, &["diabetes"], 4.3, 560, &[APOLLO, MEDPLUS, FORTIS], true),
        medicine(9, "Digene Gel", "Antacid Oral Gel", "Magnesium Hydroxide + Simethicone", "Abbott",
            125.0, &["digestive", "popular"], 4.0, 890, &[APOLLO, MEDPLUS], false),
        medicine(10, "Benadryl Syrup", "Cough Syrup", "Diphenhydramine 14.08mg/5ml", "Johnson & Johnson",
            110.0, &["cough-cold"], 4.2, 670, &[FORTIS], false),
    ];
    medicines[0].price_history = vec![
        PricePoint { date: date(2023, 10, 1), price: 42.0 },
        PricePoint { date: date(2023, 10, 15), price: 43.5 },
        PricePoint { date: date(2023, 11, 1), price: 45.0 },
    ];
    medicines
}

fn pharmacies() -> Vec<Pharmacy> {
    let pharmacy = |id, name: &str, phone: &str, address: &str, hours: &str, lat, lng, radius| Pharmacy {
        id: PharmacyId(id),
        name: name.to_string(),
        location: "Multiple Locations".to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        hours: hours.to_string(),
        coordinates: GeoLocation::new(lat, lng),
        delivery_radius_km: radius,
    };
    vec![
        pharmacy(1, APOLLO, "+91-9999999999", "123 Main St, City Center", "8:00 AM - 10:00 PM", 12.9716, 77.5946, 5.0),
        pharmacy(2, MEDPLUS, "+91-8888888888", "456 Oak Ave, Downtown", "9:00 AM - 9:00 PM", 12.9680, 77.5870, 4.0),
        pharmacy(3, FORTIS, "+91-7777777777", "789 Elm St, Medical District", "24/7", 12.9750, 77.6000, 7.0),
    ]
}

/// One entry per (medicine, stocking pharmacy). Shelf price starts at the
/// catalog price; stock follows a fixed spread so listings differ.
fn inventory(medicines: &[Medicine], pharmacies: &[Pharmacy]) -> Vec<InventoryEntry> {
    let now = Utc::now();
    medicines
        .iter()
        .flat_map(|m| {
            pharmacies
                .iter()
                .filter(|p| m.is_stocked_at(&p.name))
                .map(move |p| InventoryEntry {
                    pharmacy_id: p.id,
                    medicine_id: m.id,
                    stock: 20 + (m.id.0 * 37 + p.id.0 * 11) % 80,
                    price: m.price,
                    updated_at: now,
                })
        })
        .collect()
}

fn trends() -> Vec<DiseaseTrend> {
    let trend = |name: &str, trend: &str, direction, icon: &str| DiseaseTrend {
        name: name.to_string(),
        trend: trend.to_string(),
        direction,
        icon: icon.to_string(),
    };
    vec![
        trend("Seasonal Influenza", "+24%", TrendDirection::Increase, "lungs-virus"),
        trend("Allergic Rhinitis", "+18%", TrendDirection::Increase, "allergies"),
        trend("Viral Fever", "+15%", TrendDirection::Increase, "virus"),
        trend("Upper Respiratory Infection", "-8%", TrendDirection::Decrease, "head-side-cough"),
        trend("Gastroenteritis", "+12%", TrendDirection::Increase, "stomach"),
    ]
}

fn interaction_rules() -> Vec<InteractionRule> {
    vec![InteractionRule {
        pair: (MedicineId(2), MedicineId(5)),
        severity: Severity::Moderate,
        description: "May increase risk of muscle toxicity. Monitor for muscle pain.".to_string(),
        recommendation: "Consult your doctor before taking together.".to_string(),
    }]
}

fn admins() -> Vec<AdminAccount> {
    vec![
        AdminAccount::new(1, "admin", "admin123", PharmacyId(1)),
        AdminAccount::new(2, "medplus_admin", "medplus123", PharmacyId(2)),
        AdminAccount::new(3, "fortis_admin", "fortis123", PharmacyId(3)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stocking_pharmacy_exists() {
        let seed = demo();
        for m in &seed.medicines {
            for name in &m.pharmacies {
                assert!(
                    seed.pharmacies.iter().any(|p| &p.name == name),
                    "{} lists unknown pharmacy {name}",
                    m.name
                );
            }
        }
    }

    #[test]
    fn inventory_covers_every_listing_and_starts_in_stock() {
        let seed = demo();
        let listings: usize = seed.medicines.iter().map(|m| m.pharmacies.len()).sum();
        assert_eq!(seed.inventory.len(), listings);
        assert!(seed.inventory.iter().all(|e| e.stock > 0));
    }

    #[test]
    fn dolo_starts_at_45() {
        let seed = demo();
        let dolo = seed.medicines.iter().find(|m| m.id == MedicineId(1)).unwrap();
        assert_eq!(dolo.name, "Dolo 650");
        assert_eq!(dolo.price, 45.0);
        let prices: Vec<f64> = dolo.price_history.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![42.0, 43.5, 45.0]);
    }

    #[test]
    fn other_medicines_start_without_history() {
        let seed = demo();
        let cetzine = seed.medicines.iter().find(|m| m.id == MedicineId(3)).unwrap();
        assert!(cetzine.price_history.is_empty());
        assert_eq!(cetzine.trend_history().len(), 3);
    }
}
