use serde::{Deserialize, Serialize};

use crate::medicine::{Medicine, MedicineId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Major,
}

/// A known interaction between two catalog medicines.
#[derive(Debug, Clone)]
pub struct InteractionRule {
    pub pair: (MedicineId, MedicineId),
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

/// A rule that applies to the medicines being checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub severity: Severity,
    pub medicines: Vec<String>,
    pub description: String,
    pub recommendation: String,
}

/// Every rule whose two medicines are both in `ids`.
pub fn find_interactions(
    rules: &[InteractionRule],
    ids: &[MedicineId],
    catalog: &[Medicine],
) -> Vec<Interaction> {
    let name_of = |id: MedicineId| {
        catalog
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| format!("#{id}"))
    };

    rules
        .iter()
        .filter(|r| ids.contains(&r.pair.0) && ids.contains(&r.pair.1))
        .map(|r| Interaction {
            severity: r.severity,
            medicines: vec![name_of(r.pair.0), name_of(r.pair.1)],
            description: r.description.clone(),
            recommendation: r.recommendation.clone(),
        })
        .collect()
}
