use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::currency::format_inr;
use crate::medicine::{Medicine, MedicineId};

/// Identifier of a registered price alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AlertId(pub u32);

/// A standing request to be told when a medicine drops to `max_price` or below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: AlertId,
    pub medicine_id: MedicineId,
    pub medicine_name: String,
    pub max_price: f64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl PriceAlert {
    /// True when a price move from `old_price` to `new_price` crosses this
    /// alert's target from above. Standing below the target is not a crossing.
    pub fn is_crossed_by(&self, old_price: f64, new_price: f64) -> bool {
        self.active && crosses_target(old_price, new_price, self.max_price)
    }
}

/// `old > target >= new`.
pub fn crosses_target(old_price: f64, new_price: f64, target: f64) -> bool {
    old_price > target && new_price <= target
}

/// Payload pushed to real-time subscribers when an alert fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlertNotification {
    pub message: String,
    pub medicine: String,
    pub current_price: f64,
    pub target_price: f64,
    pub timestamp: DateTime<Utc>,
}

impl PriceAlertNotification {
    pub fn new(medicine: &Medicine, alert: &PriceAlert, timestamp: DateTime<Utc>) -> Self {
        Self {
            message: format!(
                "Price alert: {} is now {}, below your target of {}",
                medicine.name,
                format_inr(medicine.price),
                format_inr(alert.max_price)
            ),
            medicine: medicine.name.clone(),
            current_price: medicine.price,
            target_price: alert.max_price,
            timestamp,
        }
    }
}

/// Messages sent over the real-time channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RealtimeEvent {
    PriceAlert(PriceAlertNotification),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medicine::tests::dummy_medicine;

    fn alert(target: f64, active: bool) -> PriceAlert {
        PriceAlert {
            id: AlertId(11),
            medicine_id: MedicineId(1),
            medicine_name: "Dolo 650".to_string(),
            max_price: target,
            email: "a@example.com".to_string(),
            created_at: Utc::now(),
            active,
        }
    }

    #[test]
    fn crossing_requires_old_above_and_new_at_or_below() {
        assert!(crosses_target(45.0, 38.0, 40.0));
        assert!(crosses_target(45.0, 40.0, 40.0));
        assert!(!crosses_target(40.0, 38.0, 40.0));
        assert!(!crosses_target(39.0, 35.0, 40.0));
        assert!(!crosses_target(45.0, 50.0, 40.0));
        assert!(!crosses_target(38.0, 50.0, 40.0));
    }

    #[test]
    fn dolo_sequence_fires_once() {
        let a = alert(40.0, true);
        let prices = [45.0, 50.0, 38.0, 35.0];
        let fired = prices
            .windows(2)
            .filter(|w| a.is_crossed_by(w[0], w[1]))
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn inactive_alert_never_fires() {
        assert!(!alert(40.0, false).is_crossed_by(45.0, 38.0));
    }

    #[test]
    fn notification_serializes_with_type_tag() {
        let medicine = dummy_medicine(1, "Dolo 650", 38.0);
        let n = PriceAlertNotification::new(&medicine, &alert(40.0, true), Utc::now());
        assert_eq!(
            n.message,
            "Price alert: Dolo 650 is now ₹38, below your target of ₹40"
        );

        let json = serde_json::to_value(RealtimeEvent::PriceAlert(n)).unwrap();
        assert_eq!(json["type"], "price_alert");
        assert_eq!(json["medicine"], "Dolo 650");
        assert_eq!(json["current_price"], 38.0);
        assert_eq!(json["target_price"], 40.0);
        assert!(json["timestamp"].is_string());
    }
}
