//! Token command: exchange credentials for a fresh bearer token.

use surefly_core::Account;

use crate::cli::{GlobalOpts, TokenArgs};
use crate::config;
use crate::error::CliError;
use crate::output::print_output;

pub async fn handle(
    account: &Account,
    args: TokenArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let token = account.token().await?;

    if args.save {
        let path = config::save_token(&token)?;
        if !global.quiet {
            eprintln!("Token saved to {}", path.display());
        }
    }

    // The token itself goes to stdout so it can be captured in scripts.
    print_output(&token, false);
    Ok(())
}
