// Device endpoints
//
// Device listing with control/status relations, the lock-mode control
// used for flaps, curfew configuration, and tag assignment.

use serde_json::json;
use tracing::debug;

use crate::client::SureClient;
use crate::error::Error;
use crate::models::{RawControl, RawDevice};

/// Relations expanded on `GET /api/device`.
const DEVICE_RELATIONS: &[&str] = &["children", "tags", "control", "status"];

impl SureClient {
    /// List all devices with control and status relations included.
    ///
    /// `GET /api/device?with[]=children&with[]=tags&with[]=control&with[]=status`
    pub async fn list_devices(&self) -> Result<Vec<RawDevice>, Error> {
        let mut url = self.endpoint("device");
        {
            let mut query = url.query_pairs_mut();
            for relation in DEVICE_RELATIONS {
                query.append_pair("with[]", relation);
            }
        }
        debug!("listing devices");
        self.get(url).await
    }

    /// Set a flap's lock mode.
    ///
    /// `PUT /api/device/{id}/control` with the vendor lock code
    /// (0 = unlocked, 1 = locked in, 2 = locked out, 3 = locked all).
    /// The response echoes the applied control state; callers verify
    /// the echoed mode matches before reporting success.
    pub async fn set_lock_mode(&self, device_id: i64, mode: i64) -> Result<RawControl, Error> {
        let url = self.endpoint(&format!("device/{device_id}/control"));
        debug!(device_id, mode, "setting lock mode");
        self.put(url, json!({ "locking": mode })).await
    }

    /// Replace a flap's curfew windows.
    ///
    /// `PUT /api/device/{id}/control` with a `curfew` list; times are
    /// "HH:MM" in the household's timezone.
    pub async fn set_curfew(
        &self,
        device_id: i64,
        lock_time: &str,
        unlock_time: &str,
    ) -> Result<RawControl, Error> {
        let url = self.endpoint(&format!("device/{device_id}/control"));
        debug!(device_id, lock_time, unlock_time, "setting curfew");

        let body = json!({
            "curfew": [{
                "enabled": true,
                "lock_time": lock_time,
                "unlock_time": unlock_time,
            }]
        });

        self.put(url, body).await
    }

    /// Grant a tag (microchip/collar) access to a device.
    ///
    /// `PUT /api/device/{id}/tag/{tag_id}`
    pub async fn assign_tag(&self, device_id: i64, tag_id: i64) -> Result<(), Error> {
        let url = self.endpoint(&format!("device/{device_id}/tag/{tag_id}"));
        debug!(device_id, tag_id, "assigning tag to device");
        self.put_no_content(url).await
    }

    /// Revoke a tag's access to a device.
    ///
    /// `DELETE /api/device/{id}/tag/{tag_id}` -- answers 204.
    pub async fn remove_tag(&self, device_id: i64, tag_id: i64) -> Result<(), Error> {
        let url = self.endpoint(&format!("device/{device_id}/tag/{tag_id}"));
        debug!(device_id, tag_id, "removing tag from device");
        self.delete_no_content(url).await
    }
}
