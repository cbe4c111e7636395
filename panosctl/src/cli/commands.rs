//! CLI command and subcommand definitions

use clap::{Parser, Subcommand};

/// PAN-OS Panorama CLI
#[derive(Parser, Debug)]
#[command(name = "panosctl")]
#[command(version, about = "PAN-OS Panorama operational-command CLI", long_about = None)]
pub struct Cli {
    /// Device base URL (overrides config file)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// API key (overrides config file; prefer PANOSCTL_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging (overrides config file)
    #[arg(short, long)]
    pub verbose: Option<bool>,

    /// Accept self-signed device certificates
    #[arg(long)]
    pub insecure: bool,

    /// Don't load config file
    #[arg(long)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show device system information
    Info,

    /// Bootstrap VM auth key management
    VmAuthKey {
        #[command(subcommand)]
        command: VmAuthKeyCommands,
    },

    /// Device group hierarchy commands
    Dg {
        #[command(subcommand)]
        command: DgCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum VmAuthKeyCommands {
    /// Create a VM auth key
    Create {
        /// Key lifetime in hours
        #[arg(long, default_value_t = 24)]
        hours: u32,
    },

    /// List VM auth keys
    List,
}

#[derive(Subcommand, Debug)]
pub enum DgCommands {
    /// Show the device group hierarchy as a child -> parent table
    Hierarchy,

    /// Move a device group under a new parent and wait for the job
    Move {
        /// Device group to move
        child: String,

        /// New parent group; omit to move to the top level (shared)
        #[arg(long, default_value = "")]
        parent: String,
    },
}
