//! Clap derive structures for the `lmsync` CLI.
//!
//! Defines the command tree, global flags, and shared enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lmsync -- converge declared monitoring inventory against the backend
#[derive(Debug, Parser)]
#[command(
    name = "lmsync",
    version,
    about = "Converge devices, device groups, and collectors from a manifest",
    long_about = "Reads a desired-state manifest and reconciles it against the\n\
        monitoring REST API: missing resources are created (ancestor group\n\
        paths included), drifted attributes are patched with a minimal\n\
        patchFields directive, and in-sync resources are left untouched.",
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
    /// Path to the account configuration file
    #[arg(long, env = "LMSYNC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format for the run summary
    #[arg(
        long,
        short = 'o',
        env = "LMSYNC_OUTPUT",
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
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one resource per line (scripting)
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
    /// Create or update every resource the manifest declares
    #[command(alias = "up")]
    Apply(RunArgs),

    /// Delete every resource the manifest declares
    #[command(alias = "down")]
    Destroy(RunArgs),

    /// Parse and statically check a manifest without touching the network
    #[command(alias = "check")]
    Validate(RunArgs),
}

/// Arguments shared by every manifest-driven command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to the desired-state manifest
    #[arg(long, short = 'f', value_name = "MANIFEST")]
    pub file: PathBuf,
}
