use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GUIDE_SOURCE: &str = "builtin";

#[derive(Parser, Debug)]
#[command(name = "primer", version, about = "Platform-aware build-from-source onboarding guides")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Verbose diagnostics on stderr")]
    pub verbose: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_GUIDE_SOURCE,
        help = "Guide source (builtin, dir, guide.json, url, or owner/repo)"
    )]
    pub guide: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the detailed setup instructions
    Guide {
        #[arg(long, value_enum, default_value_t = PlatformArg::Auto)]
        platform: PlatformArg,
    },
    /// Render the bare command sequence
    Quickstart {
        #[arg(long, value_enum, default_value_t = PlatformArg::Auto)]
        platform: PlatformArg,
    },
    /// List step ids and titles
    Steps {
        #[arg(long, value_enum, default_value_t = PlatformArg::Auto)]
        platform: PlatformArg,
    },
    /// Show one step in full
    Show {
        step: String,
        #[arg(long, value_enum, default_value_t = PlatformArg::Auto)]
        platform: PlatformArg,
    },
    /// List the native build dependencies
    Deps,
    /// Show the toolchain policy
    Toolchain,
    /// Probe the local environment for required tools
    Doctor {
        #[arg(long, value_enum, default_value_t = PlatformArg::Auto)]
        platform: PlatformArg,
    },
    /// Run consistency checks over the rendered guide
    Validate {
        #[arg(long, value_enum, help = "Restrict checks to one platform")]
        platform: Option<PlatformArg>,
    },
    /// Show onboarding progress for the selected guide
    Progress {
        #[arg(long, value_enum, default_value_t = PlatformArg::Auto)]
        platform: PlatformArg,
    },
    /// Record a step as completed
    MarkDone {
        step: String,
        #[arg(long, value_enum, default_value_t = PlatformArg::Auto)]
        platform: PlatformArg,
    },
    /// Clear recorded progress for the selected guide
    Reset,
    /// List guides across the builtin and registered sources
    List,
    /// Manage registered guide sources
    Source {
        #[command(subcommand)]
        command: SourceCommands,
    },
    /// Author guide manifests
    Author {
        #[command(subcommand)]
        command: AuthorCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SourceCommands {
    Add { source: String },
    List,
    Update,
}

#[derive(Subcommand, Debug)]
pub enum AuthorCommands {
    /// Scaffold a guide directory with a manifest skeleton
    Init {
        #[arg(long, default_value = ".")]
        guide_dir: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        repo: String,
        #[arg(long, default_value = "")]
        summary: String,
    },
    /// Edit the native dependency list
    Dep {
        #[command(subcommand)]
        command: DepCommands,
    },
    /// Edit platform version pins
    Pin {
        #[command(subcommand)]
        command: PinCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum DepCommands {
    Add {
        name: String,
        #[arg(long, default_value = ".")]
        guide_dir: String,
        #[arg(long)]
        purpose: Option<String>,
        #[arg(long)]
        probe: Option<String>,
    },
    Remove {
        name: String,
        #[arg(long, default_value = ".")]
        guide_dir: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PinCommands {
    Add {
        dependency: String,
        pin: String,
        #[arg(long, default_value = ".")]
        guide_dir: String,
        #[arg(long, value_enum, default_value_t = PlatformArg::Windows)]
        platform: PlatformArg,
        #[arg(long, default_value = "Cargo.toml")]
        file: String,
        #[arg(long)]
        reason: Option<String>,
    },
    Remove {
        dependency: String,
        #[arg(long, default_value = ".")]
        guide_dir: String,
        #[arg(long, value_enum, default_value_t = PlatformArg::Windows)]
        platform: PlatformArg,
    },
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformArg {
    Auto,
    GenericUnix,
    Windows,
}
