//! Pet position handler.

use owo_colors::OwoColorize;

use surefly_core::{Account, EntityId, Location};

use crate::cli::{GlobalOpts, PositionArgs, PositionChoice};
use crate::error::CliError;
use crate::output::should_color;

pub async fn handle(
    account: &Account,
    args: PositionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let location = match args.position {
        PositionChoice::In => Location::Inside,
        PositionChoice::Out => Location::Outside,
    };

    account.set_position(EntityId(args.pet), location).await?;

    if !global.quiet {
        let message = format!("Pet {} set to '{}'", args.pet, location.label());
        if should_color(&global.color) {
            eprintln!("{}", message.green());
        } else {
            eprintln!("{message}");
        }
    }
    Ok(())
}
