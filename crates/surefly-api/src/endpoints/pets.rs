// Pet endpoints
//
// Pet listing with the `with[]` relations expanded, and the manual
// position override for pets the flap mis-detected.

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::client::SureClient;
use crate::error::Error;
use crate::models::{RawPet, RawPetPosition};

/// Relations expanded on `GET /api/pet` -- mirrors what the vendor app
/// requests so position and status are populated.
const PET_RELATIONS: &[&str] = &[
    "photo", "breed", "conditions", "tag", "food_type", "species", "position", "status",
];

impl SureClient {
    /// List all pets with position and status relations included.
    ///
    /// `GET /api/pet?with[]=photo&with[]=...&with[]=status`
    pub async fn list_pets(&self) -> Result<Vec<RawPet>, Error> {
        let mut url = self.endpoint("pet");
        {
            let mut query = url.query_pairs_mut();
            for relation in PET_RELATIONS {
                query.append_pair("with[]", relation);
            }
        }
        debug!("listing pets");
        self.get(url).await
    }

    /// Manually set a pet's position.
    ///
    /// `POST /api/pet/{id}/position` with the vendor location code
    /// (1 = inside, 2 = outside) and a UTC timestamp. The response
    /// echoes the stored position; callers verify the echoed state.
    pub async fn set_pet_position(
        &self,
        pet_id: i64,
        location_code: i64,
    ) -> Result<RawPetPosition, Error> {
        let url = self.endpoint(&format!("pet/{pet_id}/position"));
        debug!(pet_id, location_code, "setting pet position");

        let body = json!({
            "where": location_code,
            "since": Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });

        self.post(url, body).await
    }
}
