//! Command dispatch: bridges CLI args -> Account calls -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod entities;
pub mod locking;
pub mod notification;
pub mod pets;
pub mod position;
pub mod report;
pub mod timeline;
pub mod token;
pub mod util;

use surefly_core::Account;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an account-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    account: &Account,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(account, args, global).await,
        Command::Pets(args) => pets::handle(account, args, global).await,
        Command::Entities => entities::handle(account, global).await,
        Command::Locking(args) => locking::handle(account, args, global).await,
        Command::Position(args) => position::handle(account, args, global).await,
        Command::Notification => notification::handle(account, global).await,
        Command::Report(args) => report::handle(account, args, global).await,
        Command::Timeline(args) => timeline::handle(account, args, global).await,
        // Token, Config, and Completions are handled before dispatch
        Command::Token(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
