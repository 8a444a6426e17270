use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cockpit")]
#[command(about = "Support technician incident dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List your assigned incidents
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display a single incident
    #[command(visible_alias = "s")]
    Show {
        /// Incident sys_id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search incidents by number, title, or device
    Search {
        /// Substring to match (case-insensitive)
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or change offline (sample data) mode
    Offline {
        #[command(subcommand)]
        action: Option<OfflineAction>,
    },
}

#[derive(Subcommand)]
pub enum OfflineAction {
    /// Show whether offline mode is enabled
    Status,
    /// Enable offline mode (serve sample data)
    On,
    /// Disable offline mode (use the live backend)
    Off,
    /// Flip offline mode
    Toggle,
}
