//! Price alert registry and trigger evaluation.

use std::sync::Arc;

use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Deserializer};

use medifind_common::alert::{AlertId, PriceAlert, PriceAlertNotification, RealtimeEvent};
use medifind_common::medicine::{Medicine, MedicineId};

use crate::broadcast::Broadcaster;
use crate::error::{ApiError, ApiResult};
use crate::repository::CatalogRepository;

/// Body of `POST /api/alerts/price`.
///
/// Numbers may arrive as JSON numbers or numeric strings. A string that does
/// not parse counts as missing.
#[derive(Debug, Default, Deserialize)]
pub struct AlertRequest {
    #[serde(default, deserialize_with = "medicine_id_or_text")]
    pub medicine_id: Option<MedicineId>,
    #[serde(default, deserialize_with = "number_or_text")]
    pub max_price: Option<f64>,
    pub email: Option<String>,
}

fn number_or_text<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<N> {
        Number(N),
        Text(String),
    }

    Ok(match Option::<Raw<T>>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

fn medicine_id_or_text<'de, D>(deserializer: D) -> Result<Option<MedicineId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_or_text::<D, u32>(deserializer)?.map(MedicineId))
}

#[derive(Clone)]
pub struct AlertService {
    repo: Arc<dyn CatalogRepository>,
    broadcaster: Broadcaster,
}

impl AlertService {
    pub fn new(repo: Arc<dyn CatalogRepository>, broadcaster: Broadcaster) -> Self {
        Self { repo, broadcaster }
    }

    pub fn register(&self, req: AlertRequest) -> ApiResult<PriceAlert> {
        let (Some(medicine_id), Some(max_price), Some(email)) =
            (req.medicine_id, req.max_price, req.email)
        else {
            return Err(ApiError::validation(
                "Medicine ID, max price, and email are required",
            ));
        };
        if !max_price.is_finite() || max_price <= 0.0 {
            return Err(ApiError::validation("Max price must be a positive number"));
        }
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(ApiError::validation("Email must not be empty"));
        }

        let medicine = self
            .repo
            .medicine(medicine_id)?
            .ok_or_else(|| ApiError::not_found("Medicine not found"))?;

        let alert = PriceAlert {
            id: AlertId(self.repo.next_id()),
            medicine_id,
            medicine_name: medicine.name,
            max_price,
            email,
            created_at: Utc::now(),
            active: true,
        };
        self.repo.insert_alert(alert.clone())?;

        tracing::info!(
            alert_id = alert.id.0,
            medicine_id = %medicine_id,
            max_price,
            "price alert registered"
        );
        Ok(alert)
    }

    pub fn list(&self, medicine: Option<MedicineId>) -> ApiResult<Vec<PriceAlert>> {
        Ok(self.repo.alerts(medicine)?)
    }

    pub fn deactivate(&self, id: AlertId) -> ApiResult<PriceAlert> {
        let alert = self
            .repo
            .deactivate_alert(id)?
            .ok_or_else(|| ApiError::not_found("Alert not found"))?;
        tracing::info!(alert_id = id.0, "price alert deactivated");
        Ok(alert)
    }

    /// Evaluate alerts after `medicine` was repriced from `old_price` to its
    /// current price, and broadcast one notification per alert crossed.
    ///
    /// Notifications go to every connected subscriber, not only the address
    /// the alert was registered with.
    pub fn on_price_change(
        &self,
        medicine: &Medicine,
        old_price: f64,
    ) -> ApiResult<Vec<PriceAlertNotification>> {
        let now = Utc::now();
        let notifications: Vec<_> = self
            .repo
            .alerts(Some(medicine.id))?
            .into_iter()
            .filter(|alert| alert.is_crossed_by(old_price, medicine.price))
            .map(|alert| {
                let notification = PriceAlertNotification::new(medicine, &alert, now);
                let delivered = self
                    .broadcaster
                    .publish(RealtimeEvent::PriceAlert(notification.clone()));
                tracing::info!(
                    alert_id = alert.id.0,
                    email = %alert.email,
                    delivered,
                    "{}",
                    notification.message
                );
                notification
            })
            .collect();
        Ok(notifications)
    }
}
