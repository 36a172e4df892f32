use super::commands::connections::ConnectionCommands;
use super::commands::fields::FieldsArgs;
use super::commands::resolve::ResolveArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kusto-conn")]
#[command(about = "Resolve and manage Azure Data Explorer connections")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a connection into its authentication method and connection string
    Resolve(ResolveArgs),
    /// Print connection form metadata as JSON
    Fields(FieldsArgs),
    /// Stored connection management
    Connections(ConnectionCommands),
}
