// ── Pet domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{FoodType, Location};
use super::ids::{DeviceId, HouseholdId, PetId, TagId};

/// A pet's location, as reported by a flap or set manually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetLocation {
    pub location: Location,
    pub since: Option<DateTime<Utc>>,
    /// The flap that reported the movement, if any.
    pub device_id: Option<DeviceId>,
}

impl PetLocation {
    pub fn unknown() -> Self {
        Self {
            location: Location::Unknown,
            since: None,
            device_id: None,
        }
    }
}

/// Last feeding event: one weight change per bowl, grams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedingState {
    pub change: Vec<f64>,
    pub at: Option<DateTime<Utc>>,
    pub device_id: Option<DeviceId>,
}

/// Last drinking event, millilitres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkingState {
    pub change: Vec<f64>,
    pub at: Option<DateTime<Utc>>,
    pub device_id: Option<DeviceId>,
}

/// A pet, with its last known position and activity snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: Option<String>,
    pub household_id: Option<HouseholdId>,
    pub tag_id: Option<TagId>,
    pub food_type: FoodType,
    pub photo_url: Option<String>,
    /// Last known position (manual override or flap report).
    pub location: PetLocation,
    /// Last flap-reported activity, when the status relation carries one.
    pub activity: Option<PetLocation>,
    pub feeding: Option<FeedingState>,
    pub drinking: Option<DrinkingState>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Pet {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed")
    }

    pub fn at_home(&self) -> bool {
        self.location.location == Location::Inside
    }

    pub fn last_fed(&self) -> Option<DateTime<Utc>> {
        self.feeding.as_ref().and_then(|f| f.at)
    }

    pub fn last_drank(&self) -> Option<DateTime<Utc>> {
        self.drinking.as_ref().and_then(|d| d.at)
    }
}
