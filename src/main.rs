use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;

use cli::{Cli, Commands};
use cli::commands::{fields_command, handle_connection_command, resolve_command};

fn main() -> Result<()> {
    // Pick up KUSTO_CONN_* and AZURE_* from a local .env if present
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting kusto-conn");

    match cli.command {
        Commands::Resolve(args) => resolve_command(args),
        Commands::Fields(args) => fields_command(args),
        Commands::Connections(cmd) => handle_connection_command(cmd),
    }
}
