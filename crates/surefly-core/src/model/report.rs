// ── Report domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{DeviceId, PetId};

/// One entry/exit movement from the household report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementDatapoint {
    pub from: Option<DateTime<Utc>>,
    /// `None` while the pet is still out.
    pub to: Option<DateTime<Utc>>,
    pub active: bool,
    pub duration_secs: Option<f64>,
    pub entry_device_id: Option<DeviceId>,
    pub exit_device_id: Option<DeviceId>,
}

/// Per-pet slice of the household activity report.
///
/// Feeding and drinking datapoints stay untyped: their shape varies by
/// device mix and the CLI renders them raw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetReport {
    pub pet_id: Option<PetId>,
    pub movement: Vec<MovementDatapoint>,
    pub feeding: Vec<serde_json::Value>,
    pub drinking: Vec<serde_json::Value>,
}
