//! Report handlers: household movement report and per-pet aggregates.

use std::collections::BTreeMap;

use tabled::{Table, Tabled, settings::Style};

use surefly_core::{Account, Entity, EntityId, PetReport};

use crate::cli::{GlobalOpts, OutputFormat, ReportArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct MovementRow {
    #[tabled(rename = "Pet")]
    pet: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Exit")]
    exit: String,
}

/// Resolve an entity id to its display name, falling back to the id.
fn entity_name(entities: &BTreeMap<EntityId, Entity>, id: Option<EntityId>) -> String {
    match id {
        Some(id) => entities
            .get(&id)
            .and_then(Entity::name)
            .map_or_else(|| id.to_string(), ToOwned::to_owned),
        None => "-".into(),
    }
}

fn movement_rows(
    reports: &[PetReport],
    entities: &BTreeMap<EntityId, Entity>,
) -> Vec<MovementRow> {
    let mut rows = Vec::new();
    for report in reports {
        let pet = entity_name(entities, report.pet_id);
        for point in &report.movement {
            rows.push(MovementRow {
                pet: pet.clone(),
                from: util::short_time(point.from),
                to: if point.active {
                    "(out)".into()
                } else {
                    util::short_time(point.to)
                },
                duration: point
                    .duration_secs
                    .map_or_else(|| "-".into(), util::natural_duration),
                entry: entity_name(entities, point.entry_device_id),
                exit: entity_name(entities, point.exit_device_id),
            });
        }
    }
    rows
}

pub async fn handle(
    account: &Account,
    args: ReportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.aggregate {
        return handle_aggregate(account, &args, global).await;
    }

    let reports = account
        .report(EntityId(args.household), args.pet.map(EntityId))
        .await?;

    let out = match global.output {
        OutputFormat::Table => {
            // Resolve pet/device ids to names via the entity map.
            let entities = account.entities().await?;
            let rows = movement_rows(&reports, &entities);
            Table::new(&rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
        OutputFormat::JsonCompact => serde_json::to_string(&reports)?,
        OutputFormat::Yaml => output::render_yaml(&reports),
        OutputFormat::Plain => reports
            .iter()
            .filter_map(|r| r.pet_id)
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn handle_aggregate(
    account: &Account,
    args: &ReportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let Some(pet) = args.pet else {
        return Err(CliError::Validation {
            field: "pet".into(),
            reason: "--aggregate requires --pet".into(),
        });
    };

    let report = account
        .aggregate_report(
            EntityId(args.household),
            EntityId(pet),
            args.from.as_deref(),
            args.to.as_deref(),
        )
        .await?;

    // Aggregate payloads are untyped; always emit structured output.
    let out = match global.output {
        OutputFormat::JsonCompact => report.to_string(),
        OutputFormat::Yaml => output::render_yaml(&report),
        _ => serde_json::to_string_pretty(&report)?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
