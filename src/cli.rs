use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::export::ExportFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Team performance reports: API server and terminal dashboard")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the reports API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Reports file (overrides REPORTS_PATH)
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Directory with dashboard files served next to the API
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Print the team dashboard in the terminal
    Summary {
        /// Reports API base URL (overrides REPORTS_API_URL)
        #[arg(long)]
        api_url: Option<String>,
        /// Number of top performers to highlight (leaderboard grows to fit)
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Show rating history for one team member
    Member {
        name: String,
        /// Reports API base URL (overrides REPORTS_API_URL)
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Export the reports file as JSON or CSV
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Reports file (overrides REPORTS_PATH)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Merge a JSON export into the reports file
    Import {
        file: PathBuf,
        /// Reports file (overrides REPORTS_PATH)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
