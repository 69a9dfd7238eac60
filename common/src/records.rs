//! Append-only records with no lifecycle beyond creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrescriptionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConsultationId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: PrescriptionId,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub medicines_list: Option<String>,
    pub notes: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub status: PrescriptionStatus,
}

impl Prescription {
    pub fn patient_matches(&self, needle: &str) -> bool {
        self.patient_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    Scheduled,
}

pub const DEFAULT_CONSULTATION_TYPE: &str = "general";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: ConsultationId,
    pub patient_name: String,
    pub phone: String,
    pub preferred_time: Option<String>,
    pub consultation_type: String,
    pub query: Option<String>,
    pub status: ConsultationStatus,
    pub booked_at: DateTime<Utc>,
}
