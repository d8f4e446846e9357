// Household endpoints

use tracing::debug;

use crate::client::SureClient;
use crate::error::Error;
use crate::models::RawHousehold;

impl SureClient {
    /// List all households visible to the account.
    ///
    /// `GET /api/household`
    pub async fn list_households(&self) -> Result<Vec<RawHousehold>, Error> {
        let url = self.endpoint("household");
        debug!("listing households");
        self.get(url).await
    }
}
