// Account snapshot endpoint
//
// `me/start` is the primary entity source: one call returns every
// household, pet, device, and tag the account can see.

use tracing::debug;

use crate::client::SureClient;
use crate::error::Error;
use crate::models::MeStart;

impl SureClient {
    /// Fetch the account's full snapshot.
    ///
    /// `GET /api/me/start`
    pub async fn me_start(&self) -> Result<MeStart, Error> {
        let url = self.endpoint("me/start");
        debug!("fetching account snapshot");
        self.get(url).await
    }
}
