//! Timeline handlers.

use tabled::Tabled;

use surefly_core::{Account, EntityId};

use crate::cli::{GlobalOpts, TimelineArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct TimelineRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Household")]
    household: String,
    #[tabled(rename = "Time")]
    time: String,
}

pub async fn handle(
    account: &Account,
    args: TimelineArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let entries = match args.household {
        Some(household) => {
            account
                .household_timeline(EntityId(household), args.entries)
                .await?
        }
        None => account.timeline().await?,
    };

    let out = output::render_list(
        &global.output,
        &entries,
        |e| TimelineRow {
            id: e.id.to_string(),
            kind: e.kind.map_or_else(|| "-".into(), |k| k.to_string()),
            household: e
                .household_id
                .map(|h| h.to_string())
                .unwrap_or_default(),
            time: e.created_at.clone().unwrap_or_default(),
        },
        |e| e.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
