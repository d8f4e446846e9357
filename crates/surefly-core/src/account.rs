// ── Account facade ──
//
// The public entry point: composes the API client, the converters, and
// the auth lifecycle into one-shot operations. Each call is a single
// logical request-response cycle; there are no background tasks and no
// cached state besides the client's bearer token.

use std::collections::BTreeMap;

use tracing::debug;

use surefly_api::SureClient;

use crate::config::AccountConfig;
use crate::error::CoreError;
use crate::model::{
    Device, DeviceId, Entity, EntityId, Household, HouseholdId, LockState, Location, Notification,
    Pet, PetId, PetReport, TagId,
};

/// Handle to one vendor account.
///
/// Cheap to keep around: holds the HTTP client and the cached token.
/// Safe to share behind an `Arc` -- concurrent calls at most share a
/// single token refresh.
pub struct Account {
    client: SureClient,
}

impl Account {
    /// Create an account handle from configuration. Does not perform
    /// any network I/O; login happens lazily on the first call.
    pub fn new(config: &AccountConfig) -> Result<Self, CoreError> {
        let client = SureClient::new(config.client_auth(), &config.transport())?;
        Ok(Self { client })
    }

    /// Wrap an existing [`SureClient`].
    pub fn with_client(client: SureClient) -> Self {
        Self { client }
    }

    /// Access the underlying API client.
    pub fn client(&self) -> &SureClient {
        &self.client
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Force a fresh login and return the bearer token.
    pub async fn token(&self) -> Result<String, CoreError> {
        Ok(self.client.request_token().await?)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// All pets and devices in one id-keyed map, from the account
    /// snapshot. One API call.
    pub async fn entities(&self) -> Result<BTreeMap<EntityId, Entity>, CoreError> {
        let snapshot = self.client.me_start().await?;

        let mut entities = BTreeMap::new();
        for raw in snapshot.devices {
            let device = Device::from(raw);
            entities.insert(device.id, Entity::Device(device));
        }
        for raw in snapshot.pets {
            let pet = Pet::from(raw);
            entities.insert(pet.id, Entity::Pet(pet));
        }

        debug!(count = entities.len(), "built entity map");
        Ok(entities)
    }

    pub async fn households(&self) -> Result<Vec<Household>, CoreError> {
        let raw = self.client.list_households().await?;
        Ok(raw.into_iter().map(Household::from).collect())
    }

    pub async fn pets(&self) -> Result<Vec<Pet>, CoreError> {
        let raw = self.client.list_pets().await?;
        Ok(raw.into_iter().map(Pet::from).collect())
    }

    /// A single pet by id.
    pub async fn pet(&self, pet_id: PetId) -> Result<Pet, CoreError> {
        self.pets()
            .await?
            .into_iter()
            .find(|pet| pet.id == pet_id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "pet".into(),
                identifier: pet_id.to_string(),
            })
    }

    pub async fn devices(&self) -> Result<Vec<Device>, CoreError> {
        let raw = self.client.list_devices().await?;
        Ok(raw.into_iter().map(Device::from).collect())
    }

    /// A single device by id.
    pub async fn device(&self, device_id: DeviceId) -> Result<Device, CoreError> {
        self.devices()
            .await?
            .into_iter()
            .find(|device| device.id == device_id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "device".into(),
                identifier: device_id.to_string(),
            })
    }

    pub async fn notifications(&self) -> Result<Vec<Notification>, CoreError> {
        let raw = self.client.list_notifications().await?;
        Ok(raw.into_iter().map(Notification::from).collect())
    }

    /// Household activity report, optionally scoped to one pet.
    pub async fn report(
        &self,
        household_id: HouseholdId,
        pet_id: Option<PetId>,
    ) -> Result<Vec<PetReport>, CoreError> {
        let raw = self
            .client
            .household_report(household_id.as_i64(), pet_id.map(EntityId::as_i64))
            .await?;
        Ok(raw.into_iter().map(PetReport::from).collect())
    }

    /// Per-pet aggregate report, untyped. Pass a date range: without
    /// one the vendor returns months of datapoints.
    pub async fn aggregate_report(
        &self,
        household_id: HouseholdId,
        pet_id: PetId,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<serde_json::Value, CoreError> {
        Ok(self
            .client
            .aggregate_report(household_id.as_i64(), pet_id.as_i64(), from_date, to_date)
            .await?)
    }

    /// Account-wide timeline, raw vendor entries.
    pub async fn timeline(&self) -> Result<Vec<surefly_api::models::RawTimelineEntry>, CoreError> {
        Ok(self.client.timeline().await?)
    }

    /// Up to `entries` household timeline events (paginated fetch).
    pub async fn household_timeline(
        &self,
        household_id: HouseholdId,
        entries: usize,
    ) -> Result<Vec<surefly_api::models::RawTimelineEntry>, CoreError> {
        Ok(self
            .client
            .household_timeline(household_id.as_i64(), entries)
            .await?)
    }

    // ── Lock control ─────────────────────────────────────────────────

    /// Lock a flap in both directions.
    pub async fn lock(&self, device_id: DeviceId) -> Result<(), CoreError> {
        self.set_lock_state(device_id, LockState::LockedAll).await
    }

    /// Keep pets in: outbound locked, inbound free.
    pub async fn lock_in(&self, device_id: DeviceId) -> Result<(), CoreError> {
        self.set_lock_state(device_id, LockState::LockedIn).await
    }

    /// Keep pets out: inbound locked, outbound free.
    pub async fn lock_out(&self, device_id: DeviceId) -> Result<(), CoreError> {
        self.set_lock_state(device_id, LockState::LockedOut).await
    }

    pub async fn unlock(&self, device_id: DeviceId) -> Result<(), CoreError> {
        self.set_lock_state(device_id, LockState::Unlocked).await
    }

    /// Set a flap's lock mode and verify the echoed state.
    ///
    /// Locking an already-locked flap is a no-op on the vendor side:
    /// one request, same resulting state, reported as success.
    pub async fn set_lock_state(
        &self,
        device_id: DeviceId,
        state: LockState,
    ) -> Result<(), CoreError> {
        let mode = match state {
            LockState::Unlocked
            | LockState::LockedIn
            | LockState::LockedOut
            | LockState::LockedAll => state.code(),
            other => {
                return Err(CoreError::ValidationFailed {
                    message: format!("'{}' cannot be requested directly", other.label()),
                });
            }
        };

        let control = self.client.set_lock_mode(device_id.as_i64(), mode).await?;

        if control.locking == Some(mode) {
            debug!(%device_id, state = state.label(), "lock state applied");
            Ok(())
        } else {
            Err(CoreError::OperationFailed {
                message: format!(
                    "device {device_id} did not apply lock state '{}'",
                    state.label()
                ),
            })
        }
    }

    /// Replace a flap's curfew with a single enabled window and verify
    /// the echoed configuration. Times are "HH:MM" in the household's
    /// timezone.
    pub async fn set_curfew(
        &self,
        device_id: DeviceId,
        lock_time: &str,
        unlock_time: &str,
    ) -> Result<(), CoreError> {
        let control = self
            .client
            .set_curfew(device_id.as_i64(), lock_time, unlock_time)
            .await?;

        let applied = control
            .curfew
            .map(surefly_api::models::OneOrMany::into_vec)
            .unwrap_or_default()
            .iter()
            .any(|c| {
                c.enabled == Some(true)
                    && c.lock_time.as_deref() == Some(lock_time)
                    && c.unlock_time.as_deref() == Some(unlock_time)
            });

        if applied {
            Ok(())
        } else {
            Err(CoreError::OperationFailed {
                message: format!("device {device_id} did not apply the curfew"),
            })
        }
    }

    // ── Pet position ─────────────────────────────────────────────────

    /// Manually set a pet's position and verify the echoed state.
    /// Only `Inside` and `Outside` can be requested.
    pub async fn set_position(
        &self,
        pet_id: PetId,
        location: Location,
    ) -> Result<(), CoreError> {
        if location == Location::Unknown {
            return Err(CoreError::ValidationFailed {
                message: "position must be 'inside' or 'outside'".into(),
            });
        }

        let position = self
            .client
            .set_pet_position(pet_id.as_i64(), location.code())
            .await?;

        if position.location == Some(location.code()) {
            debug!(%pet_id, location = location.label(), "position applied");
            Ok(())
        } else {
            Err(CoreError::OperationFailed {
                message: format!("pet {pet_id} was not set to '{}'", location.label()),
            })
        }
    }

    // ── Tags ─────────────────────────────────────────────────────────

    /// Grant a tag access to a device.
    pub async fn assign_tag(&self, device_id: DeviceId, tag_id: TagId) -> Result<(), CoreError> {
        Ok(self
            .client
            .assign_tag(device_id.as_i64(), tag_id.as_i64())
            .await?)
    }

    /// Revoke a tag's access to a device.
    pub async fn remove_tag(&self, device_id: DeviceId, tag_id: TagId) -> Result<(), CoreError> {
        Ok(self
            .client
            .remove_tag(device_id.as_i64(), tag_id.as_i64())
            .await?)
    }
}
