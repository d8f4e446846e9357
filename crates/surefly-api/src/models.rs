// Cloud API response types
//
// Models for the vendor's JSON payloads. All responses are wrapped in
// the `Envelope<T>` container. Fields use `#[serde(default)]` liberally
// because the API omits fields inconsistently across device types and
// firmware generations; undocumented fields land in `extra`.

use serde::{Deserialize, Serialize};

// ── Response envelope ────────────────────────────────────────────────

/// Standard response envelope: every endpoint wraps its payload as
/// `{ "data": ... }` where `data` is an object or an array.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A field the API serializes as either a single object or a list,
/// depending on device generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

// ── Aggregate start payload ──────────────────────────────────────────

/// Payload of `GET /api/me/start`: the account's full snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct MeStart {
    #[serde(default)]
    pub households: Vec<RawHousehold>,
    #[serde(default)]
    pub pets: Vec<RawPet>,
    #[serde(default)]
    pub devices: Vec<RawDevice>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
    /// Catch-all for undocumented fields (user, photos, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Household ────────────────────────────────────────────────────────

/// Household object from `me/start` or `GET /api/household`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHousehold {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub share_code: Option<String>,
    #[serde(default)]
    pub timezone_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Pet ──────────────────────────────────────────────────────────────

/// Pet object from `me/start` or `GET /api/pet`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPet {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub household_id: Option<i64>,
    #[serde(default)]
    pub tag_id: Option<i64>,
    #[serde(default)]
    pub food_type_id: Option<i64>,
    #[serde(default)]
    pub species_id: Option<i64>,
    #[serde(default)]
    pub breed_id: Option<i64>,
    #[serde(default)]
    pub photo: Option<RawPhoto>,
    #[serde(default)]
    pub position: Option<RawPetPosition>,
    #[serde(default)]
    pub status: Option<RawPetStatus>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPhoto {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Last known position, from the pet's `position` relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPetPosition {
    /// Vendor location code: 1 = inside, 2 = outside.
    #[serde(default, rename = "where")]
    pub location: Option<i64>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Pet `status` relation: per-activity sub-objects, each optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPetStatus {
    #[serde(default)]
    pub activity: Option<RawPetActivity>,
    #[serde(default)]
    pub feeding: Option<RawPetFeeding>,
    #[serde(default)]
    pub drinking: Option<RawPetDrinking>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPetActivity {
    #[serde(default, rename = "where")]
    pub location: Option<i64>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub tag_id: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Last feeding event: one weight change per bowl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPetFeeding {
    #[serde(default)]
    pub change: Vec<f64>,
    #[serde(default)]
    pub at: Option<String>,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub tag_id: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPetDrinking {
    #[serde(default)]
    pub change: Vec<f64>,
    #[serde(default)]
    pub at: Option<String>,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub tag_id: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Device ───────────────────────────────────────────────────────────

/// Device object from `me/start` or `GET /api/device`.
///
/// One shape serves hubs, flaps, feeders, and water stations; the
/// `product_id` discriminates. Status sub-objects appear only where the
/// hardware supports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDevice {
    pub id: i64,
    /// Vendor product code: 1 = hub, 3 = pet flap, 4 = feeder,
    /// 6 = cat flap, 7 = feeder lite, 8 = water station.
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub household_id: Option<i64>,
    #[serde(default)]
    pub parent_device_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub status: Option<RawDeviceStatus>,
    #[serde(default)]
    pub control: Option<RawControl>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Device `status` relation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDeviceStatus {
    #[serde(default)]
    pub online: Option<bool>,
    /// Pack voltage across all cells; see the battery formula in core.
    #[serde(default)]
    pub battery: Option<f64>,
    #[serde(default)]
    pub locking: Option<RawLocking>,
    #[serde(default)]
    pub signal: Option<RawSignal>,
    #[serde(default)]
    pub version: Option<serde_json::Value>,
    #[serde(default)]
    pub learn_mode: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLocking {
    /// Vendor lock mode code (0-4).
    pub mode: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSignal {
    #[serde(default)]
    pub device_rssi: Option<f64>,
    #[serde(default)]
    pub hub_rssi: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Device `control` relation; also the response payload of
/// `PUT /api/device/{id}/control`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawControl {
    /// Vendor lock mode code, echoed back on lock commands.
    #[serde(default)]
    pub locking: Option<i64>,
    #[serde(default)]
    pub curfew: Option<OneOrMany<RawCurfew>>,
    #[serde(default)]
    pub fast_polling: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A curfew window on a flap, times in the household's timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCurfew {
    #[serde(default)]
    pub enabled: Option<bool>,
    /// "HH:MM"
    #[serde(default)]
    pub lock_time: Option<String>,
    /// "HH:MM"
    #[serde(default)]
    pub unlock_time: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Tag ──────────────────────────────────────────────────────────────

/// Microchip/collar tag from `me/start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTag {
    pub id: i64,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Notification ─────────────────────────────────────────────────────

/// Notification entry from `GET /api/notification`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNotification {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub kind: Option<i64>,
    #[serde(default)]
    pub household_id: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub seen: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Timeline ─────────────────────────────────────────────────────────

/// Timeline entry from `GET /api/timeline` and the household timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTimelineEntry {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub kind: Option<i64>,
    #[serde(default)]
    pub household_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Catch-all: pets, devices, movements, weights, ...
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Reports ──────────────────────────────────────────────────────────

/// Per-pet activity report from `GET /api/report/household/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPetReport {
    #[serde(default)]
    pub pet_id: Option<i64>,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub movement: Option<RawDatapoints<RawMovementDatapoint>>,
    #[serde(default)]
    pub feeding: Option<RawDatapoints<serde_json::Value>>,
    #[serde(default)]
    pub drinking: Option<RawDatapoints<serde_json::Value>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDatapoints<T> {
    #[serde(default)]
    pub datapoints: Vec<T>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One entry/exit movement in a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMovementDatapoint {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    /// Present (true) while the pet is still out.
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub entry_device_id: Option<i64>,
    #[serde(default)]
    pub exit_device_id: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_deserializes_with_sparse_fields() {
        // Hubs carry no battery or locking status.
        let raw: RawDevice = serde_json::from_value(serde_json::json!({
            "id": 100,
            "product_id": 1,
            "household_id": 1,
            "name": "Hub",
            "status": { "online": true }
        }))
        .expect("sparse device should deserialize");

        assert_eq!(raw.id, 100);
        let status = raw.status.expect("status present");
        assert_eq!(status.online, Some(true));
        assert!(status.battery.is_none());
        assert!(status.locking.is_none());
    }

    #[test]
    fn curfew_accepts_object_and_list() {
        let control: RawControl = serde_json::from_value(serde_json::json!({
            "curfew": { "enabled": true, "lock_time": "20:00", "unlock_time": "07:00" }
        }))
        .expect("single curfew object");
        assert_eq!(control.curfew.map(|c| c.into_vec().len()), Some(1));

        let control: RawControl = serde_json::from_value(serde_json::json!({
            "curfew": [
                { "enabled": true, "lock_time": "20:00", "unlock_time": "07:00" },
                { "enabled": false, "lock_time": "12:00", "unlock_time": "13:00" }
            ]
        }))
        .expect("curfew list");
        assert_eq!(control.curfew.map(|c| c.into_vec().len()), Some(2));
    }

    #[test]
    fn unknown_fields_collect_into_extra() {
        let raw: RawPet = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Mia",
            "comments": "undocumented",
            "version": 3
        }))
        .expect("pet with unknown fields");

        assert_eq!(raw.extra.len(), 2);
        assert!(raw.extra.contains_key("comments"));
    }
}
