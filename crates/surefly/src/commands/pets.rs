//! Pet command handlers.

use tabled::Tabled;

use surefly_core::{Account, EntityId, Pet};

use crate::cli::{GlobalOpts, PetsArgs, PetsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Where")]
    location: String,
    #[tabled(rename = "Since")]
    since: String,
    #[tabled(rename = "Last Fed")]
    last_fed: String,
    #[tabled(rename = "Last Drank")]
    last_drank: String,
    #[tabled(rename = "Household")]
    household: String,
}

impl From<&Pet> for PetRow {
    fn from(p: &Pet) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.display_name().to_owned(),
            location: p.location.location.label().to_owned(),
            since: util::short_time(p.location.since),
            last_fed: util::short_time(p.last_fed()),
            last_drank: util::short_time(p.last_drank()),
            household: p.household_id.map(|h| h.to_string()).unwrap_or_default(),
        }
    }
}

fn detail(p: &Pet) -> String {
    let mut lines = vec![
        format!("ID:        {}", p.id),
        format!("Name:      {}", p.display_name()),
        format!(
            "Household: {}",
            p.household_id.map_or_else(|| "-".into(), |h| h.to_string())
        ),
        format!(
            "Tag:       {}",
            p.tag_id.map_or_else(|| "-".into(), |t| t.to_string())
        ),
        format!("Where:     {}", p.location.location.label()),
        format!("Since:     {}", util::short_time(p.location.since)),
        format!("Food:      {:?}", p.food_type),
    ];
    if let Some(ref feeding) = p.feeding {
        let changes: Vec<String> = feeding.change.iter().map(|c| format!("{c}g")).collect();
        lines.push(format!(
            "Feeding:   {} at {}",
            changes.join(" / "),
            util::short_time(feeding.at)
        ));
    }
    if let Some(ref drinking) = p.drinking {
        let changes: Vec<String> = drinking.change.iter().map(|c| format!("{c}ml")).collect();
        lines.push(format!(
            "Drinking:  {} at {}",
            changes.join(" / "),
            util::short_time(drinking.at)
        ));
    }
    if let Some(ref url) = p.photo_url {
        lines.push(format!("Photo:     {url}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    account: &Account,
    args: PetsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PetsCommand::List => {
            let pets = account.pets().await?;
            let out =
                output::render_list(&global.output, &pets, |p| PetRow::from(p), |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PetsCommand::Get { pet } => {
            let pet = account.pet(EntityId(pet)).await?;
            let out = output::render_single(&global.output, &pet, detail, |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
