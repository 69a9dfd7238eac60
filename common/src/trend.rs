use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increase,
    Decrease,
}

/// Regional disease trend shown on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseTrend {
    pub name: String,
    /// Signed percentage label, e.g. `+24%`.
    pub trend: String,
    #[serde(rename = "type")]
    pub direction: TrendDirection,
    pub icon: String,
}
