//! Usage statistics DTOs.
//!
//! - `StatsPayload`: Raw upstream body `{ data: { total_seconds, range: { date } } }`
//! - `StatsView`: Derived, display-ready snapshot for the footer widget
//! - `StatsStatus`: Poller state shown alongside the view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsPayload {
    #[serde(default)]
    pub data: Option<StatsData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsData {
    #[serde(default)]
    pub total_seconds: Option<f64>,
    #[serde(default)]
    pub range: Option<StatsRange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsRange {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatsStatus {
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsView {
    pub status: StatsStatus,
    pub total_seconds: Option<f64>,
    pub total_time: Option<String>,
    pub date: Option<String>,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    /// A poll cycle is running right now.
    pub refreshing: bool,
}
