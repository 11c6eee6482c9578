mod client;
mod commands;
mod config;
mod domain;
mod format;
mod server;
#[cfg(test)]
mod testutil;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fleetboard", version, about = "Dashboard client for node fleets")]
struct Cli {
    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the fleet-wide dashboard snapshot
    Dashboard {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Inspect and manage fleet nodes
    Nodes {
        #[command(subcommand)]
        command: commands::nodes::NodeCommands,
    },

    /// Show the node leaderboard
    Rank {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show the logged-in operator
    Whoami {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Refresh the dashboard periodically in the terminal
    Watch {
        /// Refresh interval in seconds (overrides config)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Serve the local dashboard viewer
    Serve {
        /// Listen address (overrides config)
        #[arg(long)]
        addr: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let base_url = cli.base_url.as_deref();

    match cli.command {
        Commands::Dashboard { format } => commands::dashboard::run(base_url, &format),
        Commands::Nodes { command } => commands::nodes::run(base_url, &command),
        Commands::Rank { format } => commands::rank::run(base_url, &format),
        Commands::Whoami { format } => commands::user::run(base_url, &format),
        Commands::Watch { interval } => commands::watch::run(base_url, interval),
        Commands::Serve { addr } => commands::serve::run(base_url, addr.as_deref()),
    }
}
