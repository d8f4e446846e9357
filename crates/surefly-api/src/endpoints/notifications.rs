// Notification endpoints

use tracing::debug;

use crate::client::SureClient;
use crate::error::Error;
use crate::models::RawNotification;

impl SureClient {
    /// List the account's notifications, newest first.
    ///
    /// `GET /api/notification`
    pub async fn list_notifications(&self) -> Result<Vec<RawNotification>, Error> {
        let url = self.endpoint("notification");
        debug!("listing notifications");
        self.get(url).await
    }
}
