// Report endpoints
//
// Per-household and per-pet activity reports. The aggregate report can
// be very large without a date range; callers should pass one.

use tracing::debug;

use crate::client::SureClient;
use crate::error::Error;
use crate::models::RawPetReport;

impl SureClient {
    /// Fetch the household activity report, optionally scoped to a pet.
    ///
    /// `GET /api/report/household/{id}` or
    /// `GET /api/report/household/{id}/pet/{pet_id}`
    pub async fn household_report(
        &self,
        household_id: i64,
        pet_id: Option<i64>,
    ) -> Result<Vec<RawPetReport>, Error> {
        let path = match pet_id {
            Some(pet_id) => format!("report/household/{household_id}/pet/{pet_id}"),
            None => format!("report/household/{household_id}"),
        };
        let url = self.endpoint(&path);
        debug!(household_id, ?pet_id, "fetching household report");

        // The pet-scoped variant returns a single report object.
        match pet_id {
            Some(_) => {
                let report: RawPetReport = self.get(url).await?;
                Ok(vec![report])
            }
            None => self.get(url).await,
        }
    }

    /// Fetch the per-pet aggregate report.
    ///
    /// `GET /api/report/household/{id}/pet/{pet_id}/aggregate[?from=&to=]`
    /// with dates as `YYYY-MM-DD`. Returned untyped: the payload is
    /// large and its shape varies by device mix.
    pub async fn aggregate_report(
        &self,
        household_id: i64,
        pet_id: i64,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<serde_json::Value, Error> {
        let mut url =
            self.endpoint(&format!("report/household/{household_id}/pet/{pet_id}/aggregate"));
        if let (Some(from), Some(to)) = (from_date, to_date) {
            url.query_pairs_mut()
                .append_pair("from", from)
                .append_pair("to", to);
        }
        debug!(household_id, pet_id, "fetching aggregate report");
        self.get(url).await
    }
}
