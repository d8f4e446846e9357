//! Merged entity listing.

use tabled::Tabled;

use surefly_core::{Account, Entity};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Household")]
    household: String,
}

impl From<&Entity> for EntityRow {
    fn from(e: &Entity) -> Self {
        Self {
            id: e.id().to_string(),
            kind: e
                .kind()
                .map_or_else(|| "Pet".to_owned(), |k| k.label().to_owned()),
            name: e.name().unwrap_or("-").to_owned(),
            household: e
                .household_id()
                .map(|h| h.to_string())
                .unwrap_or_default(),
        }
    }
}

pub async fn handle(account: &Account, global: &GlobalOpts) -> Result<(), CliError> {
    let entities = account.entities().await?;
    let list: Vec<Entity> = entities.into_values().collect();

    let out = output::render_list(&global.output, &list, |e| EntityRow::from(e), |e| {
        e.id().to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
