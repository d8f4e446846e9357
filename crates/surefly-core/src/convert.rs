// ── API-to-domain type conversions ──
//
// Bridges raw `surefly_api` payloads into the canonical `model` types.
// Every impl is total: missing or malformed optional fields become
// defaults or `Unknown` sentinels, never errors. The vendor omits
// fields inconsistently across device types, so nothing here assumes
// a field is present.

use chrono::{DateTime, NaiveDateTime, Utc};

use surefly_api::models::{
    RawDevice, RawHousehold, RawMovementDatapoint, RawNotification, RawPet, RawPetDrinking,
    RawPetFeeding, RawPetReport,
};

use crate::model::{
    Curfew, Device, DrinkingState, FeedingState, FoodType, Household, LockState, Location,
    MovementDatapoint, Notification, Pet, PetLocation, PetReport, ProductKind, Signal,
    ids::EntityId,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse the vendor's timestamp strings. Most are RFC 3339; the
/// position endpoint echoes naive "YYYY-MM-DD HH:MM:SS" in UTC.
fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

fn opt_id(raw: Option<i64>) -> Option<EntityId> {
    raw.map(EntityId)
}

// ── Household ──────────────────────────────────────────────────────

impl From<RawHousehold> for Household {
    fn from(raw: RawHousehold) -> Self {
        Self {
            id: EntityId(raw.id),
            name: raw.name,
            timezone_id: raw.timezone_id,
            created_at: parse_datetime(raw.created_at.as_deref()),
            updated_at: parse_datetime(raw.updated_at.as_deref()),
        }
    }
}

// ── Pet ────────────────────────────────────────────────────────────

impl From<RawPetFeeding> for FeedingState {
    fn from(raw: RawPetFeeding) -> Self {
        Self {
            change: raw.change,
            at: parse_datetime(raw.at.as_deref()),
            device_id: opt_id(raw.device_id),
        }
    }
}

impl From<RawPetDrinking> for DrinkingState {
    fn from(raw: RawPetDrinking) -> Self {
        Self {
            change: raw.change,
            at: parse_datetime(raw.at.as_deref()),
            device_id: opt_id(raw.device_id),
        }
    }
}

impl From<RawPet> for Pet {
    fn from(raw: RawPet) -> Self {
        let location = raw.position.as_ref().map_or_else(PetLocation::unknown, |p| {
            PetLocation {
                location: p.location.map_or(Location::Unknown, Location::from_code),
                since: parse_datetime(p.since.as_deref()),
                device_id: opt_id(p.device_id),
            }
        });

        let status = raw.status.unwrap_or_default();

        let activity = status.activity.map(|a| PetLocation {
            location: a.location.map_or(Location::Unknown, Location::from_code),
            since: parse_datetime(a.since.as_deref()),
            device_id: opt_id(a.device_id),
        });

        Self {
            id: EntityId(raw.id),
            name: raw.name,
            household_id: opt_id(raw.household_id),
            tag_id: opt_id(raw.tag_id),
            food_type: raw.food_type_id.map_or(FoodType::Unknown, FoodType::from_code),
            photo_url: raw.photo.and_then(|p| p.location),
            location,
            activity,
            feeding: status.feeding.map(FeedingState::from),
            drinking: status.drinking.map(DrinkingState::from),
            updated_at: parse_datetime(raw.updated_at.as_deref()),
        }
    }
}

// ── Device ─────────────────────────────────────────────────────────

impl From<RawDevice> for Device {
    fn from(raw: RawDevice) -> Self {
        let status = raw.status.unwrap_or_default();
        let control = raw.control.unwrap_or_default();

        // Lock state can come from status (live) or control (configured);
        // status wins when both are present.
        let lock_state = status
            .locking
            .as_ref()
            .map(|l| l.mode)
            .or(control.locking)
            .map(LockState::from_code);

        let curfews = control
            .curfew
            .map(surefly_api::models::OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(|c| Curfew {
                enabled: c.enabled.unwrap_or(false),
                lock_time: c.lock_time,
                unlock_time: c.unlock_time,
            })
            .collect();

        let signal = status.signal.map(|s| Signal {
            device_rssi: s.device_rssi,
            hub_rssi: s.hub_rssi,
        });

        Self {
            id: EntityId(raw.id),
            kind: ProductKind::from_code(raw.product_id),
            name: raw.name,
            household_id: opt_id(raw.household_id),
            parent_id: opt_id(raw.parent_device_id),
            serial: raw.serial_number,
            mac_address: raw.mac_address,
            online: status.online.unwrap_or(false),
            battery_voltage: status.battery,
            lock_state,
            curfews,
            signal,
            created_at: parse_datetime(raw.created_at.as_deref()),
            updated_at: parse_datetime(raw.updated_at.as_deref()),
        }
    }
}

// ── Notification ───────────────────────────────────────────────────

impl From<RawNotification> for Notification {
    fn from(raw: RawNotification) -> Self {
        Self {
            id: EntityId(raw.id),
            kind: raw.kind,
            household_id: opt_id(raw.household_id),
            text: raw.text,
            seen: raw.seen.unwrap_or(false),
            created_at: parse_datetime(raw.created_at.as_deref()),
        }
    }
}

// ── Report ─────────────────────────────────────────────────────────

impl From<RawMovementDatapoint> for MovementDatapoint {
    fn from(raw: RawMovementDatapoint) -> Self {
        Self {
            from: parse_datetime(raw.from.as_deref()),
            to: parse_datetime(raw.to.as_deref()),
            active: raw.active.unwrap_or(false),
            duration_secs: raw.duration,
            entry_device_id: opt_id(raw.entry_device_id),
            exit_device_id: opt_id(raw.exit_device_id),
        }
    }
}

impl From<RawPetReport> for PetReport {
    fn from(raw: RawPetReport) -> Self {
        Self {
            pet_id: opt_id(raw.pet_id),
            movement: raw
                .movement
                .map(|m| m.datapoints.into_iter().map(MovementDatapoint::from).collect())
                .unwrap_or_default(),
            feeding: raw.feeding.map(|f| f.datapoints).unwrap_or_default(),
            drinking: raw.drinking.map(|d| d.datapoints).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn raw_pet(value: serde_json::Value) -> RawPet {
        serde_json::from_value(value).unwrap()
    }

    fn raw_device(value: serde_json::Value) -> RawDevice {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn minimal_pet_maps_to_unknown_sentinels() {
        let pet = Pet::from(raw_pet(json!({ "id": 7 })));

        assert_eq!(pet.id, EntityId(7));
        assert_eq!(pet.display_name(), "Unnamed");
        assert_eq!(pet.location.location, Location::Unknown);
        assert_eq!(pet.food_type, FoodType::Unknown);
        assert!(pet.feeding.is_none());
        assert!(!pet.at_home());
    }

    #[test]
    fn full_pet_maps_position_and_status() {
        let pet = Pet::from(raw_pet(json!({
            "id": 7,
            "name": "Mia",
            "household_id": 2,
            "tag_id": 11,
            "food_type_id": 2,
            "photo": { "location": "https://example.com/mia.jpg" },
            "position": { "where": 1, "since": "2024-06-15T10:30:00+00:00", "device_id": 42 },
            "status": {
                "feeding": { "change": [-12.5, 0.0], "at": "2024-06-15T08:00:00+00:00" },
                "activity": { "where": 2, "since": "2024-06-15T09:00:00+00:00" }
            }
        })));

        assert_eq!(pet.name.as_deref(), Some("Mia"));
        assert_eq!(pet.household_id, Some(EntityId(2)));
        assert_eq!(pet.food_type, FoodType::Dry);
        assert!(pet.at_home());
        assert_eq!(pet.location.device_id, Some(EntityId(42)));
        assert_eq!(pet.feeding.as_ref().unwrap().change, vec![-12.5, 0.0]);
        assert_eq!(
            pet.activity.as_ref().unwrap().location,
            Location::Outside
        );
    }

    #[test]
    fn naive_timestamp_parses_as_utc() {
        let pet = Pet::from(raw_pet(json!({
            "id": 7,
            "position": { "where": 2, "since": "2024-06-15 10:30:58" }
        })));
        assert!(pet.location.since.is_some());
    }

    #[test]
    fn flap_maps_lock_state_and_battery() {
        let device = Device::from(raw_device(json!({
            "id": 42,
            "product_id": 6,
            "household_id": 2,
            "parent_device_id": 100,
            "name": "Back Door",
            "serial_number": "H008-0123456",
            "status": {
                "online": true,
                "battery": 6.4,
                "locking": { "mode": 3 },
                "signal": { "device_rssi": -70.5, "hub_rssi": -62.0 }
            }
        })));

        assert_eq!(device.kind, ProductKind::CatFlap);
        assert!(device.is_flap());
        assert!(device.online);
        assert_eq!(device.lock_state, Some(LockState::LockedAll));
        assert_eq!(device.battery_percent(), Some(100));
        assert_eq!(device.parent_id, Some(EntityId(100)));
        assert_eq!(device.is_unlocked(), Some(false));
    }

    #[test]
    fn hub_maps_without_battery_or_lock() {
        let device = Device::from(raw_device(json!({
            "id": 100,
            "product_id": 1,
            "household_id": 2,
            "name": "Hub",
            "status": { "online": true }
        })));

        assert!(device.is_hub());
        assert_eq!(device.battery_percent(), None);
        assert_eq!(device.lock_state, None);
        assert_eq!(device.is_unlocked(), None);
    }

    #[test]
    fn device_with_no_status_is_offline_unknown() {
        let device = Device::from(raw_device(json!({ "id": 5, "product_id": 99 })));

        assert_eq!(device.kind, ProductKind::Unknown);
        assert!(!device.online);
        assert!(device.curfews.is_empty());
    }

    #[test]
    fn control_curfew_object_maps_to_one_window() {
        let device = Device::from(raw_device(json!({
            "id": 42,
            "product_id": 3,
            "control": {
                "locking": 0,
                "curfew": { "enabled": true, "lock_time": "20:00", "unlock_time": "07:00" }
            }
        })));

        assert_eq!(device.curfews.len(), 1);
        assert!(device.curfews[0].enabled);
        assert_eq!(device.lock_state, Some(LockState::Unlocked));
    }

    #[test]
    fn report_maps_movement_datapoints() {
        let raw: RawPetReport = serde_json::from_value(json!({
            "pet_id": 7,
            "movement": {
                "datapoints": [
                    {
                        "from": "2024-06-15T08:00:00+00:00",
                        "to": "2024-06-15T09:30:00+00:00",
                        "duration": 5400.0,
                        "entry_device_id": 42,
                        "exit_device_id": 42
                    },
                    { "from": "2024-06-15T10:00:00+00:00", "active": true }
                ]
            }
        }))
        .unwrap();

        let report = PetReport::from(raw);
        assert_eq!(report.pet_id, Some(EntityId(7)));
        assert_eq!(report.movement.len(), 2);
        assert!(!report.movement[0].active);
        assert!(report.movement[1].active);
        assert!(report.movement[1].to.is_none());
    }
}
