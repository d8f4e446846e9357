// Timeline endpoints
//
// The account timeline plus the paginated per-household timeline
// (the API caps each page at 25 entries).

use tracing::debug;

use crate::client::SureClient;
use crate::error::Error;
use crate::models::RawTimelineEntry;

/// Hard page cap imposed by the API.
pub const TIMELINE_PAGE_SIZE: usize = 25;

impl SureClient {
    /// Fetch the account-wide timeline.
    ///
    /// `GET /api/timeline`
    pub async fn timeline(&self) -> Result<Vec<RawTimelineEntry>, Error> {
        let url = self.endpoint("timeline");
        debug!("fetching account timeline");
        self.get(url).await
    }

    /// Fetch up to `entries` household timeline events, paginating as
    /// needed.
    ///
    /// `GET /api/timeline/household/{id}?page={n}&page_size=25`
    pub async fn household_timeline(
        &self,
        household_id: i64,
        entries: usize,
    ) -> Result<Vec<RawTimelineEntry>, Error> {
        let pages = entries.div_ceil(TIMELINE_PAGE_SIZE).max(1);
        let mut all = Vec::with_capacity(entries);

        for page in 1..=pages {
            let mut url = self.endpoint(&format!("timeline/household/{household_id}"));
            url.query_pairs_mut()
                .append_pair("page", &page.to_string())
                .append_pair("page_size", &TIMELINE_PAGE_SIZE.to_string());
            debug!(household_id, page, "fetching household timeline page");

            let batch: Vec<RawTimelineEntry> = self.get(url).await?;
            let last_page = batch.len() < TIMELINE_PAGE_SIZE;
            all.extend(batch);
            if last_page {
                break;
            }
        }

        all.truncate(entries);
        Ok(all)
    }
}
