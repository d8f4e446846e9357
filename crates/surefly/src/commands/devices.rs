//! Device command handlers.

use tabled::Tabled;

use surefly_core::{Account, Device, EntityId};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Household")]
    household: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Online")]
    online: String,
    #[tabled(rename = "Battery")]
    battery: String,
    #[tabled(rename = "Lock")]
    lock: String,
    #[tabled(rename = "Serial")]
    serial: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.to_string(),
            household: d.household_id.map(|h| h.to_string()).unwrap_or_default(),
            name: d.display_name().to_owned(),
            kind: d.kind.label().to_owned(),
            online: if d.online { "yes" } else { "no" }.to_owned(),
            battery: d
                .battery_percent()
                .map_or_else(|| "-".into(), |p| format!("{p}%")),
            lock: d
                .lock_state
                .map_or_else(|| "-".into(), |s| s.label().to_owned()),
            serial: d.serial.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

fn detail(d: &Device) -> String {
    let mut lines = vec![
        format!("ID:        {}", d.id),
        format!("Name:      {}", d.display_name()),
        format!("Type:      {}", d.kind.label()),
        format!(
            "Household: {}",
            d.household_id.map_or_else(|| "-".into(), |h| h.to_string())
        ),
        format!(
            "Parent:    {}",
            d.parent_id.map_or_else(|| "-".into(), |p| p.to_string())
        ),
        format!("Serial:    {}", d.serial.as_deref().unwrap_or("-")),
        format!("MAC:       {}", d.mac_address.as_deref().unwrap_or("-")),
        format!("Online:    {}", if d.online { "yes" } else { "no" }),
    ];
    if let Some(percent) = d.battery_percent() {
        lines.push(format!("Battery:   {percent}%"));
    }
    if let Some(state) = d.lock_state {
        lines.push(format!("Lock:      {}", state.label()));
    }
    for curfew in &d.curfews {
        lines.push(format!(
            "Curfew:    {} - {} ({})",
            curfew.lock_time.as_deref().unwrap_or("?"),
            curfew.unlock_time.as_deref().unwrap_or("?"),
            if curfew.enabled { "enabled" } else { "disabled" },
        ));
    }
    if let Some(signal) = d.signal {
        if let Some(rssi) = signal.device_rssi {
            lines.push(format!("RSSI:      {rssi:.1} dBm"));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    account: &Account,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let devices = account.devices().await?;
            let out = output::render_list(
                &global.output,
                &devices,
                |d| DeviceRow::from(d),
                |d| d.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let device = account.device(EntityId(device)).await?;
            let out =
                output::render_single(&global.output, &device, detail, |d| d.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::AssignTag { device, tag } => {
            account.assign_tag(EntityId(device), EntityId(tag)).await?;
            if !global.quiet {
                eprintln!("Tag {tag} assigned to device {device}");
            }
            Ok(())
        }

        DevicesCommand::RemoveTag { device, tag } => {
            if !util::confirm(
                &format!("Revoke tag {tag}'s access to device {device}?"),
                global.yes,
            )? {
                return Ok(());
            }
            account.remove_tag(EntityId(device), EntityId(tag)).await?;
            if !global.quiet {
                eprintln!("Tag {tag} removed from device {device}");
            }
            Ok(())
        }
    }
}
