// ── Vendor code enums ──
//
// Integer-coded enums from the wire contract. Every `from_code` is
// total: unrecognized codes land on an `Unknown` variant instead of
// failing, because the vendor adds products and states without notice.

use serde::{Deserialize, Serialize};

/// Product kind, from the vendor `product_id` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ProductKind {
    Hub,
    Repeater,
    /// Pet Door Connect.
    PetFlap,
    /// Microchip Pet Feeder Connect.
    Feeder,
    Programmer,
    /// Cat Flap Connect.
    CatFlap,
    FeederLite,
    /// Felaqua water station.
    Felaqua,
    Unknown,
}

impl ProductKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Hub,
            2 => Self::Repeater,
            3 => Self::PetFlap,
            4 => Self::Feeder,
            5 => Self::Programmer,
            6 => Self::CatFlap,
            7 => Self::FeederLite,
            8 => Self::Felaqua,
            _ => Self::Unknown,
        }
    }

    /// Lockable pet doors (both flap products).
    pub fn is_flap(self) -> bool {
        matches!(self, Self::PetFlap | Self::CatFlap)
    }

    pub fn is_feeder(self) -> bool {
        matches!(self, Self::Feeder | Self::FeederLite)
    }

    /// Human-readable label for tables and messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hub => "Hub",
            Self::Repeater => "Repeater",
            Self::PetFlap => "Pet Flap",
            Self::Feeder => "Feeder",
            Self::Programmer => "Programmer",
            Self::CatFlap => "Cat Flap",
            Self::FeederLite => "Feeder Lite",
            Self::Felaqua => "Felaqua",
            Self::Unknown => "Unknown",
        }
    }
}

/// Flap lock mode. Codes 0-4 come from the API; the negative curfew
/// sub-states are synthetic refinements of `Curfew`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LockState {
    Unlocked,
    LockedIn,
    LockedOut,
    LockedAll,
    Curfew,
    CurfewLocked,
    CurfewUnlocked,
    CurfewUnknown,
    Unknown,
}

impl LockState {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Unlocked,
            1 => Self::LockedIn,
            2 => Self::LockedOut,
            3 => Self::LockedAll,
            4 => Self::Curfew,
            -1 => Self::CurfewLocked,
            -2 => Self::CurfewUnlocked,
            -3 => Self::CurfewUnknown,
            _ => Self::Unknown,
        }
    }

    /// The wire code, for states that can be sent to the API.
    pub fn code(self) -> i64 {
        match self {
            Self::Unlocked => 0,
            Self::LockedIn => 1,
            Self::LockedOut => 2,
            Self::LockedAll => 3,
            Self::Curfew => 4,
            Self::CurfewLocked => -1,
            Self::CurfewUnlocked => -2,
            Self::CurfewUnknown => -3,
            Self::Unknown => -3,
        }
    }

    pub fn is_unlocked(self) -> bool {
        matches!(self, Self::Unlocked | Self::CurfewUnlocked)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unlocked => "unlocked",
            Self::LockedIn => "locked in",
            Self::LockedOut => "locked out",
            Self::LockedAll => "locked",
            Self::Curfew => "curfew",
            Self::CurfewLocked => "curfew (locked)",
            Self::CurfewUnlocked => "curfew (unlocked)",
            Self::CurfewUnknown | Self::Unknown => "unknown",
        }
    }
}

/// Pet location relative to the household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Inside,
    Outside,
    Unknown,
}

impl Location {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Inside,
            2 => Self::Outside,
            _ => Self::Unknown,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Inside => 1,
            Self::Outside => 2,
            Self::Unknown => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
            Self::Unknown => "unknown",
        }
    }
}

/// Food type assigned to a pet or bowl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodType {
    Wet,
    Dry,
    Both,
    Unknown,
}

impl FoodType {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Wet,
            2 => Self::Dry,
            3 => Self::Both,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_state_codes_round_trip() {
        for code in [0, 1, 2, 3, 4] {
            assert_eq!(LockState::from_code(code).code(), code);
        }
    }

    #[test]
    fn unknown_codes_are_total() {
        assert_eq!(ProductKind::from_code(99), ProductKind::Unknown);
        assert_eq!(LockState::from_code(42), LockState::Unknown);
        assert_eq!(Location::from_code(7), Location::Unknown);
        assert_eq!(FoodType::from_code(-5), FoodType::Unknown);
    }

    #[test]
    fn curfew_unlocked_counts_as_unlocked() {
        assert!(LockState::Unlocked.is_unlocked());
        assert!(LockState::CurfewUnlocked.is_unlocked());
        assert!(!LockState::LockedAll.is_unlocked());
    }
}
