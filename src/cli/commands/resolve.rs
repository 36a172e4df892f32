//! Resolve a connection and print its descriptor

use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use kusto_conn::api::{AuthMethod, ConnectionDescriptor};
use kusto_conn::auth::EnvironmentCredential;
use kusto_conn::config::{Config, ConnectionConfig, uri};

#[derive(Args)]
pub struct ResolveArgs {
    /// Connection id (defaults to the configured default connection)
    pub conn_id: Option<String>,
    /// Resolve this connection URI or JSON instead of a stored connection
    #[arg(long, conflicts_with = "conn_id")]
    pub uri: Option<String>,
    /// Print secret values in the connection string
    #[arg(long)]
    pub show_secrets: bool,
}

pub fn resolve_command(args: ResolveArgs) -> Result<()> {
    let connection = match &args.uri {
        Some(value) => uri::parse_connection(value).context("Failed to parse --uri")?,
        None => load_stored(args.conn_id.as_deref())?,
    };

    let descriptor = connection.resolve()?;

    print_descriptor(&descriptor, args.show_secrets);

    if descriptor.method() == AuthMethod::ExternalTokenCredential {
        print_environment_credential_status();
    }

    Ok(())
}

fn load_stored(conn_id: Option<&str>) -> Result<ConnectionConfig> {
    let config = Config::load()?;
    let conn_id = match conn_id {
        Some(id) => id.to_string(),
        None => config
            .default_connection
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No connection id given and no default connection configured"))?,
    };

    config
        .get_connection(&conn_id)?
        .ok_or_else(|| anyhow::anyhow!("Connection '{}' not found", conn_id))
}

fn print_descriptor(descriptor: &ConnectionDescriptor, show_secrets: bool) {
    let method = descriptor.method();

    println!();
    println!("  {} {}", "✓".bright_green().bold(), "Connection resolved".bright_white().bold());
    println!("  {:<12} {}", "Host:".dimmed(), descriptor.host().cyan());
    println!(
        "  {:<12} {} ({})",
        "Method:".dimmed(),
        method.as_str().bright_green(),
        method.description()
    );
    if let Some(tenant) = descriptor.tenant() {
        println!("  {:<12} {}", "Tenant:".dimmed(), tenant.bright_yellow());
    }

    let connection_string = if show_secrets {
        descriptor.connection_string()
    } else {
        descriptor.redacted_connection_string()
    };
    println!("  {:<12} {}", "Connection:".dimmed(), connection_string);
    println!();
}

fn print_environment_credential_status() {
    match EnvironmentCredential::from_env() {
        Ok(credential) => println!(
            "  {} Environment credential found for client {} (authority {})",
            "✓".bright_green().bold(),
            credential.client_id.bright_green(),
            credential.authority.cyan()
        ),
        Err(err) => println!(
            "  {} {}",
            "⚠️ ".bright_yellow().bold(),
            format!("No environment credential: {}", err).bright_yellow()
        ),
    }
}
