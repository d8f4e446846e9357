// ── Core identity type ──
//
// The vendor keys every entity by a numeric id from one shared
// namespace, so a single newtype covers pets, devices, households,
// and tags. The aliases exist for signature readability only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Canonical identifier for any entity (pet, device, household, tag).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub i64);

pub type HouseholdId = EntityId;
pub type PetId = EntityId;
pub type DeviceId = EntityId;
pub type TagId = EntityId;

impl EntityId {
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_round_trips_display() {
        let id = EntityId(12345);
        assert_eq!(id.to_string(), "12345");
        assert_eq!("12345".parse::<EntityId>().unwrap(), id);
    }

    #[test]
    fn entity_id_rejects_non_numeric() {
        assert!("flap".parse::<EntityId>().is_err());
    }
}
