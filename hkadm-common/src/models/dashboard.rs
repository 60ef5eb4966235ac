//! Admin dashboard statistics

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoCount {
    pub promo: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyCount {
    pub technologie: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: String,
    pub count: u64,
}

/// GET /admin/dashboard response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_inscrits: u64,
    #[serde(default)]
    pub inscriptions_aujourdhui: Option<u64>,
    #[serde(default)]
    pub par_promo: Vec<PromoCount>,
    #[serde(default)]
    pub par_technologie: Vec<TechnologyCount>,
    #[serde(default)]
    pub inscriptions_par_jour: Option<Vec<DayCount>>,
    /// Set when no hackathon is active
    #[serde(default)]
    pub message: Option<String>,
}
