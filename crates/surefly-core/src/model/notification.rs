// ── Notification domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EntityId, HouseholdId};

/// A push-style notification from the vendor service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: EntityId,
    /// Vendor notification type code; the set is undocumented.
    pub kind: Option<i64>,
    pub household_id: Option<HouseholdId>,
    pub text: Option<String>,
    pub seen: bool,
    pub created_at: Option<DateTime<Utc>>,
}
