//! Clap derive structures for the `surefly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! This file must only depend on clap + clap_complete -- the build
//! script includes it directly for man-page generation.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// surefly -- CLI for Sure Petcare pet doors, feeders, and pets
#[derive(Debug, Parser)]
#[command(
    name = "surefly",
    version,
    about = "Control Sure Petcare devices and pets from the command line",
    long_about = "A CLI for the Sure Petcare cloud API: list pets and devices,\n\
        lock and unlock flaps, set pet positions, and read reports.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "SUREFLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API token (overrides the discovery chain)
    #[arg(long, short = 't', env = "SUREFLY_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Account email for credential login
    #[arg(long, env = "SUREFLY_EMAIL", global = true)]
    pub email: Option<String>,

    /// Account password for credential login
    #[arg(long, env = "SUREFLY_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// API root override (self-hosted mirrors, tests)
    #[arg(long, env = "SUREFLY_API_URL", global = true, hide = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SUREFLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SUREFLY_TIMEOUT", default_value = "45", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and inspect devices (hubs, flaps, feeders)
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// List and inspect pets
    Pets(PetsArgs),

    /// List all entities (pets + devices merged, keyed by id)
    #[command(alias = "ent")]
    Entities,

    /// Lock control for flaps
    #[command(alias = "lock")]
    Locking(LockingArgs),

    /// Manually set a pet's position
    #[command(alias = "pos")]
    Position(PositionArgs),

    /// List notifications
    #[command(alias = "notif")]
    Notification,

    /// Pet/household activity reports
    Report(ReportArgs),

    /// Household or account timeline
    Timeline(TimelineArgs),

    /// Get a fresh API token from credentials
    Token(TokenArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List all devices
    #[command(alias = "ls")]
    List,

    /// Get device details
    Get {
        /// Device id
        device: i64,
    },

    /// Grant a tag (microchip/collar) access to a device
    AssignTag {
        /// Device id
        device: i64,

        /// Tag id
        tag: i64,
    },

    /// Revoke a tag's access to a device
    RemoveTag {
        /// Device id
        device: i64,

        /// Tag id
        tag: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PetsArgs {
    #[command(subcommand)]
    pub command: PetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PetsCommand {
    /// List all pets
    #[command(alias = "ls")]
    List,

    /// Get pet details
    Get {
        /// Pet id
        pet: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOCKING
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LockingArgs {
    #[command(subcommand)]
    pub command: LockingCommand,
}

#[derive(Debug, Subcommand)]
pub enum LockingCommand {
    /// Lock a flap in both directions
    Lock {
        /// Device id of the flap
        device: i64,
    },

    /// Keep pets in (outbound locked)
    In {
        /// Device id of the flap
        device: i64,
    },

    /// Keep pets out (inbound locked)
    Out {
        /// Device id of the flap
        device: i64,
    },

    /// Unlock a flap
    Unlock {
        /// Device id of the flap
        device: i64,
    },

    /// Set a curfew window (times in the household's timezone)
    Curfew {
        /// Device id of the flap
        device: i64,

        /// Lock time, "HH:MM"
        #[arg(long)]
        lock_time: String,

        /// Unlock time, "HH:MM"
        #[arg(long)]
        unlock_time: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  POSITION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PositionArgs {
    /// Pet id
    pub pet: i64,

    /// Where the pet actually is
    #[arg(value_enum)]
    pub position: PositionChoice,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PositionChoice {
    /// Inside the house
    In,
    /// Outside
    Out,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Household id
    #[arg(long, short = 'H', required = true)]
    pub household: i64,

    /// Scope to one pet
    #[arg(long)]
    pub pet: Option<i64>,

    /// Fetch the aggregate report instead (requires --pet)
    #[arg(long, requires = "pet")]
    pub aggregate: bool,

    /// Aggregate range start, "YYYY-MM-DD"
    #[arg(long, requires = "aggregate")]
    pub from: Option<String>,

    /// Aggregate range end, "YYYY-MM-DD"
    #[arg(long, requires = "aggregate")]
    pub to: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TIMELINE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// Household id (omit for the account-wide timeline)
    #[arg(long, short = 'H')]
    pub household: Option<i64>,

    /// Max entries to fetch (household timeline only)
    #[arg(long, short = 'n', default_value = "25")]
    pub entries: usize,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TOKEN
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Save the token to the token file for later runs
    #[arg(long)]
    pub save: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create an initial config file
    Init,

    /// Display the current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
