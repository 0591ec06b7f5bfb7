use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tickline")]
#[command(about = "Work your support-ticket queue from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name for backend configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Authenticate against the ticket backend
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// List, inspect, and update tickets
    Tickets {
        #[command(subcommand)]
        command: TicketCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Ticket API base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show resolved profile config
    Show {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Login with email/password and store the session locally
    Login {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Agent account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Agent account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Show auth status for profile
    Status {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
    /// Logout profile and clear the stored session
    Logout {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TicketCommands {
    /// List tickets (your own by default)
    List {
        /// List every ticket of the client account, not just yours
        #[arg(long)]
        all: bool,
        /// Filter by status code (OPN, INP, CRS, CNR, RES)
        #[arg(long, value_name = "CODE")]
        status: Option<String>,
        /// Only tickets created on or after this date
        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<String>,
        /// Only tickets created on or before this date
        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one ticket with its complaints
    Show {
        /// Ticket id
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Submit a remark/status update for a ticket
    Update {
        /// Ticket id
        id: i64,
        /// Remark describing the update
        #[arg(long, value_name = "TEXT")]
        remark: String,
        /// New status code (OPN, INP, CRS, CNR, RES)
        #[arg(long, value_name = "CODE")]
        status: String,
        /// Optional follow-up date
        #[arg(long, value_name = "YYYY-MM-DD")]
        follow_up: Option<String>,
    },
    /// Show aggregate ticket counts by status
    Counts {
        /// Count across the whole client account instead of your queue
        #[arg(long)]
        by_client: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
