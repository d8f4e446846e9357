// ── Household domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::HouseholdId;

/// Account-level grouping of pets and devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub id: HouseholdId,
    pub name: Option<String>,
    pub timezone_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Household {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed household")
    }
}
