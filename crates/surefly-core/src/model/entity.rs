// ── The merged entity type ──
//
// One closed enum over everything the account snapshot returns, so
// callers can hold pets and devices in a single id-keyed map.

use serde::{Deserialize, Serialize};

use super::device::Device;
use super::enums::ProductKind;
use super::ids::{EntityId, HouseholdId};
use super::pet::Pet;

/// Any typed object produced by the mapper: a pet or a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum Entity {
    Pet(Pet),
    Device(Device),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Pet(pet) => pet.id,
            Self::Device(device) => device.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Pet(pet) => pet.name.as_deref(),
            Self::Device(device) => device.name.as_deref(),
        }
    }

    pub fn household_id(&self) -> Option<HouseholdId> {
        match self {
            Self::Pet(pet) => pet.household_id,
            Self::Device(device) => device.household_id,
        }
    }

    /// Product kind for devices; pets have no product code.
    pub fn kind(&self) -> Option<ProductKind> {
        match self {
            Self::Pet(_) => None,
            Self::Device(device) => Some(device.kind),
        }
    }

    pub fn as_pet(&self) -> Option<&Pet> {
        match self {
            Self::Pet(pet) => Some(pet),
            Self::Device(_) => None,
        }
    }

    pub fn as_device(&self) -> Option<&Device> {
        match self {
            Self::Device(device) => Some(device),
            Self::Pet(_) => None,
        }
    }
}
