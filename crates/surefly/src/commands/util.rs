//! Shared helpers for command handlers.

use chrono::{DateTime, Utc};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// "15/06 10:30" style timestamp for tables; "-" when absent.
pub fn short_time(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "-".into(), |t| t.format("%d/%m %H:%M").to_string())
}

/// Human-friendly duration: "3d 4h 12m", "2h 5m", "42min", "30sec".
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn natural_duration(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    let (hours, rem) = (total / 3600, total % 3600);
    let (minutes, seconds) = (rem / 60, rem % 60);

    if total >= 86_400 {
        let (days, hours) = (hours / 24, hours % 24);
        format!("{days}d {hours}h {minutes}m")
    } else if total >= 3600 {
        if minutes < 2 || minutes > 58 {
            format!("{hours}h")
        } else {
            format!("{hours}h {minutes}m")
        }
    } else if total > 60 {
        format!("{minutes}min")
    } else {
        format!("{seconds}sec")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_pick_suitable_units() {
        assert_eq!(natural_duration(30.0), "30sec");
        assert_eq!(natural_duration(300.0), "5min");
        assert_eq!(natural_duration(7500.0), "2h 5m");
        assert_eq!(natural_duration(2.0 * 86_400.0 + 3600.0), "2d 1h 0m");
    }

    #[test]
    fn near_whole_hours_round_to_hours() {
        assert_eq!(natural_duration(3660.0), "1h");
        assert_eq!(natural_duration(3600.0 + 59.0 * 60.0), "1h");
    }
}
