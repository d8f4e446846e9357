//! Lock control handlers.

use owo_colors::OwoColorize;

use surefly_core::{Account, EntityId, LockState};

use crate::cli::{GlobalOpts, LockingArgs, LockingCommand};
use crate::error::CliError;
use crate::output::should_color;

pub async fn handle(
    account: &Account,
    args: LockingArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (device, state) = match args.command {
        LockingCommand::Lock { device } => (device, LockState::LockedAll),
        LockingCommand::In { device } => (device, LockState::LockedIn),
        LockingCommand::Out { device } => (device, LockState::LockedOut),
        LockingCommand::Unlock { device } => (device, LockState::Unlocked),
        LockingCommand::Curfew {
            device,
            lock_time,
            unlock_time,
        } => {
            validate_curfew_time(&lock_time)?;
            validate_curfew_time(&unlock_time)?;
            account
                .set_curfew(EntityId(device), &lock_time, &unlock_time)
                .await?;
            if !global.quiet {
                eprintln!("Device {device} curfew set to {lock_time} - {unlock_time}");
            }
            return Ok(());
        }
    };

    account.set_lock_state(EntityId(device), state).await?;

    if !global.quiet {
        let message = format!("Device {device} set to '{}'", state.label());
        if should_color(&global.color) {
            eprintln!("{}", message.green());
        } else {
            eprintln!("{message}");
        }
    }
    Ok(())
}

/// Curfew times must be "HH:MM".
fn validate_curfew_time(time: &str) -> Result<(), CliError> {
    let valid = time.len() == 5
        && time.as_bytes()[2] == b':'
        && time[..2].parse::<u8>().is_ok_and(|h| h < 24)
        && time[3..].parse::<u8>().is_ok_and(|m| m < 60);

    if valid {
        Ok(())
    } else {
        Err(CliError::Validation {
            field: "curfew time".into(),
            reason: format!("expected HH:MM, got '{time}'"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curfew_times_are_validated() {
        assert!(validate_curfew_time("20:00").is_ok());
        assert!(validate_curfew_time("07:30").is_ok());
        assert!(validate_curfew_time("24:00").is_err());
        assert!(validate_curfew_time("20:60").is_err());
        assert!(validate_curfew_time("8pm").is_err());
    }
}
