use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Catalog identifier of a medicine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MedicineId(pub u32);

impl std::fmt::Display for MedicineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry in a medicine's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// A medicine listed in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub description: String,
    /// Price in rupees.
    pub price: f64,
    pub category: Vec<String>,
    pub rating: f32,
    pub reviews: u32,
    pub availability: String,
    /// Names of the pharmacies that stock this medicine.
    pub pharmacies: Vec<String>,
    pub composition: String,
    pub manufacturer: String,
    pub prescription_required: bool,
    /// Oldest first.
    pub price_history: Vec<PricePoint>,
}

impl Medicine {
    pub fn has_category(&self, category: &str) -> bool {
        self.category.iter().any(|c| c == category)
    }

    pub fn is_stocked_at(&self, pharmacy_name: &str) -> bool {
        self.pharmacies.iter().any(|p| p == pharmacy_name)
    }

    /// Case-insensitive match of `needle` against name, description and composition.
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.composition.to_lowercase().contains(needle)
    }

    /// Set a new price and append it to the history. Returns the previous price.
    pub fn reprice(&mut self, price: f64, on: NaiveDate) -> f64 {
        let old = self.price;
        self.price = price;
        self.price_history.push(PricePoint { date: on, price });
        old
    }

    /// History to report for trends. Falls back to a synthetic three-point
    /// ramp ending at the current price when nothing has been recorded.
    pub fn trend_history(&self) -> Vec<PricePoint> {
        if !self.price_history.is_empty() {
            return self.price_history.clone();
        }
        let point = |y, m, d, factor: f64| PricePoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            price: self.price * factor,
        };
        vec![
            point(2023, 10, 1, 0.90),
            point(2023, 10, 15, 0.95),
            point(2023, 11, 1, 1.00),
        ]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn dummy_medicine(id: u32, name: &str, price: f64) -> Medicine {
        Medicine {
            id: MedicineId(id),
            name: name.to_string(),
            description: format!("{name} tablets"),
            price,
            category: vec!["popular".to_string()],
            rating: 4.0,
            reviews: 100,
            availability: "in-stock".to_string(),
            pharmacies: vec!["Apollo Pharmacy".to_string()],
            composition: format!("{name} 500mg"),
            manufacturer: "Test Labs".to_string(),
            prescription_required: false,
            price_history: vec![],
        }
    }

    #[test]
    fn reprice_returns_old_price_and_records_history() {
        let mut m = dummy_medicine(1, "Dolo 650", 45.0);
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let old = m.reprice(38.0, day);
        assert_eq!(old, 45.0);
        assert_eq!(m.price, 38.0);
        assert_eq!(m.price_history.last(), Some(&PricePoint { date: day, price: 38.0 }));
    }

    #[test]
    fn text_match_covers_composition() {
        let mut m = dummy_medicine(1, "Dolo 650", 45.0);
        m.composition = "Paracetamol 650mg".to_string();
        assert!(m.matches_text("paracetamol"));
        assert!(m.matches_text("dolo"));
        assert!(!m.matches_text("ibuprofen"));
    }

    #[test]
    fn trend_history_synthesizes_when_empty() {
        let m = dummy_medicine(1, "Dolo 650", 100.0);
        let history = m.trend_history();
        assert_eq!(history.len(), 3);
        assert!((history[0].price - 90.0).abs() < 1e-9);
        assert!((history[2].price - 100.0).abs() < 1e-9);
        assert!(m.price_history.is_empty());
    }
}
