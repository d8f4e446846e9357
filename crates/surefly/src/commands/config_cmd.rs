//! Config command handlers: profile management without touching the API.

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output::print_output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Profiles => profiles(global),
        ConfigCommand::Use { name } => use_profile(&name, global),
        ConfigCommand::SetPassword { profile } => set_password(profile.as_deref(), global),
    }
}

/// Guided setup: create a profile with email and (optionally) a
/// keyring-stored password.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    let email: String = Input::new()
        .with_prompt("Account email")
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    let profile = Profile {
        email: Some(email),
        timeout: Some(global.timeout),
        ..Profile::default()
    };

    cfg.profiles.insert(profile_name.clone(), profile);
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(profile_name.clone());
    }
    config::save_config(&cfg)?;

    if !global.quiet {
        eprintln!(
            "Profile '{profile_name}' written to {}",
            config::config_path().display()
        );
        eprintln!("Store the password with: surefly config set-password");
    }
    Ok(())
}

/// Display the resolved configuration (passwords and tokens redacted).
fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let redacted = redact(&cfg);
    let toml_str = toml::to_string_pretty(&redacted).map_err(|e| CliError::Config {
        message: e.to_string(),
    })?;
    print_output(&toml_str, global.quiet);
    Ok(())
}

fn profiles(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let default = cfg.default_profile.as_deref().unwrap_or("default");

    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();

    let mut lines = Vec::new();
    for name in names {
        let marker = if name == default { "*" } else { " " };
        lines.push(format!("{marker} {name}"));
    }
    if lines.is_empty() {
        lines.push("(no profiles configured)".into());
    }
    print_output(&lines.join("\n"), global.quiet);
    Ok(())
}

fn use_profile(name: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    if !cfg.profiles.contains_key(name) {
        return Err(CliError::ProfileNotFound { name: name.into() });
    }
    cfg.default_profile = Some(name.to_owned());
    config::save_config(&cfg)?;
    if !global.quiet {
        eprintln!("Default profile set to '{name}'");
    }
    Ok(())
}

/// Store a password in the system keyring under `{profile}/password`.
fn set_password(profile: Option<&str>, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = profile
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| config::active_profile_name(global, &cfg));

    let password = rpassword::prompt_password("Account password: ")?;

    let entry = keyring::Entry::new("surefly", &format!("{profile_name}/password")).map_err(
        |e| CliError::Config {
            message: format!("keyring unavailable: {e}"),
        },
    )?;
    entry.set_password(&password).map_err(|e| CliError::Config {
        message: format!("failed to store password: {e}"),
    })?;

    if !global.quiet {
        eprintln!("Password stored for profile '{profile_name}'");
    }
    Ok(())
}

/// Copy the config with secret material replaced by placeholders.
fn redact(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: surefly_config::Defaults {
            output: cfg.defaults.output.clone(),
            timeout: cfg.defaults.timeout,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, p)| {
                (
                    name.clone(),
                    Profile {
                        email: p.email.clone(),
                        password: p.password.as_ref().map(|_| "<redacted>".into()),
                        token: p.token.as_ref().map(|_| "<redacted>".into()),
                        api_url: p.api_url.clone(),
                        timeout: p.timeout,
                    },
                )
            })
            .collect(),
    }
}
