//! Notification listing.

use tabled::Tabled;

use surefly_core::{Account, Notification};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct NotificationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Seen")]
    seen: String,
    #[tabled(rename = "Text")]
    text: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            time: util::short_time(n.created_at),
            kind: n.kind.map_or_else(|| "-".into(), |k| k.to_string()),
            seen: if n.seen { "yes" } else { "no" }.to_owned(),
            text: n.text.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(account: &Account, global: &GlobalOpts) -> Result<(), CliError> {
    let notifications = account.notifications().await?;
    let out = output::render_list(&global.output, &notifications, |n| NotificationRow::from(n), |n| {
        n.id.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
