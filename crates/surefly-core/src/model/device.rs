// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{LockState, ProductKind};
use super::ids::{DeviceId, HouseholdId};

// Battery chemistry constants: four AA cells, full at 1.6V/cell,
// flat at 1.2V/cell.
const BATTERY_VOLTAGE_FULL: f64 = 1.6;
const BATTERY_VOLTAGE_LOW: f64 = 1.2;
const BATTERY_CELLS: f64 = 4.0;

/// A curfew window on a flap; times are "HH:MM" in the household's
/// timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curfew {
    pub enabled: bool,
    pub lock_time: Option<String>,
    pub unlock_time: Option<String>,
}

/// Radio signal quality between a device and its hub.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Signal {
    pub device_rssi: Option<f64>,
    pub hub_rssi: Option<f64>,
}

/// The canonical device type: hubs, flaps, feeders, and water stations
/// share one shape, discriminated by [`ProductKind`]. Fields that only
/// some hardware reports are `Option`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub kind: ProductKind,
    pub name: Option<String>,
    pub household_id: Option<HouseholdId>,
    /// The hub this device pairs through; `None` for hubs themselves.
    pub parent_id: Option<DeviceId>,
    pub serial: Option<String>,
    pub mac_address: Option<String>,
    pub online: bool,
    /// Raw pack voltage as reported; see [`Device::battery_percent`].
    pub battery_voltage: Option<f64>,
    /// Current lock mode; flaps only.
    pub lock_state: Option<LockState>,
    pub curfews: Vec<Curfew>,
    pub signal: Option<Signal>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Device {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed device")
    }

    pub fn is_flap(&self) -> bool {
        self.kind.is_flap()
    }

    pub fn is_hub(&self) -> bool {
        self.kind == ProductKind::Hub
    }

    /// Battery level in percent, derived from the reported pack voltage.
    /// Hubs are mains powered and report no voltage.
    pub fn battery_percent(&self) -> Option<u8> {
        self.battery_voltage.and_then(battery_percent_from_voltage)
    }

    /// Whether a pet can currently pass; `None` for non-flaps.
    pub fn is_unlocked(&self) -> Option<bool> {
        self.lock_state.map(LockState::is_unlocked)
    }
}

/// Map a reported pack voltage to a 0-100 percentage.
fn battery_percent_from_voltage(voltage: f64) -> Option<u8> {
    if !voltage.is_finite() || voltage <= 0.0 {
        return None;
    }
    let per_cell = voltage / BATTERY_CELLS;
    let fraction = (per_cell - BATTERY_VOLTAGE_LOW) / (BATTERY_VOLTAGE_FULL - BATTERY_VOLTAGE_LOW);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some((fraction * 100.0).clamp(0.0, 100.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pack_is_100_percent() {
        assert_eq!(battery_percent_from_voltage(6.4), Some(100));
    }

    #[test]
    fn flat_pack_is_0_percent() {
        assert_eq!(battery_percent_from_voltage(4.8), Some(0));
    }

    #[test]
    fn midpoint_is_50_percent() {
        assert_eq!(battery_percent_from_voltage(5.6), Some(50));
    }

    #[test]
    fn overfull_pack_clamps_to_100() {
        assert_eq!(battery_percent_from_voltage(7.0), Some(100));
    }

    #[test]
    fn garbage_voltage_is_none() {
        assert_eq!(battery_percent_from_voltage(0.0), None);
        assert_eq!(battery_percent_from_voltage(f64::NAN), None);
    }
}
