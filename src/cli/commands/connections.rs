//! Stored connection management

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use std::collections::BTreeMap;

use kusto_conn::api::constants::{CONN_TYPE, keys};
use kusto_conn::api::models::Secret;
use kusto_conn::config::{Config, ConnectionConfig};

#[derive(Args)]
pub struct ConnectionCommands {
    #[command(subcommand)]
    pub command: ConnectionSubcommands,
}

#[derive(Subcommand)]
pub enum ConnectionSubcommands {
    /// List stored connections
    List,
    /// Show a connection, environment overrides included
    Show {
        /// Connection id
        conn_id: String,
        /// Print the connection in URI form
        #[arg(long)]
        uri: bool,
        /// Print secret values
        #[arg(long)]
        show_secrets: bool,
    },
    /// Add or replace a connection; it must resolve before it is saved
    Add {
        /// Connection id
        conn_id: String,
        /// Data Explorer cluster URL
        #[arg(long)]
        host: String,
        /// Username, client id or application id, depending on the method
        #[arg(long)]
        login: Option<String>,
        /// Password or application key
        #[arg(long, conflicts_with = "prompt_password")]
        password: Option<String>,
        /// Prompt for the password instead of passing it as an argument
        #[arg(long)]
        prompt_password: bool,
        /// AAD_APP, AAD_APP_CERT, AAD_CREDS, AAD_DEVICE or AZURE_TOKEN_CRED
        #[arg(long)]
        auth_method: Option<String>,
        /// Tenant ID
        #[arg(long)]
        tenant: Option<String>,
        /// File holding the application PEM certificate
        #[arg(long)]
        certificate_file: Option<String>,
        /// Application certificate thumbprint
        #[arg(long)]
        thumbprint: Option<String>,
        /// Make this the default connection
        #[arg(long)]
        default: bool,
    },
    /// Remove a connection
    Remove {
        /// Connection id
        conn_id: String,
    },
}

pub fn handle_connection_command(cmd: ConnectionCommands) -> Result<()> {
    let mut config = Config::load()?;

    match cmd.command {
        ConnectionSubcommands::List => list_connections(&config),
        ConnectionSubcommands::Show {
            conn_id,
            uri,
            show_secrets,
        } => show_connection(&config, &conn_id, uri, show_secrets),
        ConnectionSubcommands::Add {
            conn_id,
            host,
            login,
            password,
            prompt_password,
            auth_method,
            tenant,
            certificate_file,
            thumbprint,
            default,
        } => {
            let password = if prompt_password {
                Some(rpassword::prompt_password("Password: ").context("Failed to read password")?)
            } else {
                password
            };
            let certificate = certificate_file
                .map(|path| {
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read certificate file: {}", path))
                })
                .transpose()?;

            let mut extra = BTreeMap::new();
            for (key, value) in [
                (keys::AUTH_METHOD, auth_method),
                (keys::TENANT, tenant),
                (keys::CERTIFICATE, certificate),
                (keys::THUMBPRINT, thumbprint),
            ] {
                if let Some(value) = value {
                    extra.insert(key.to_string(), value);
                }
            }

            let connection = ConnectionConfig {
                conn_type: Some(CONN_TYPE.to_string()),
                host: Some(host),
                login,
                password: password.map(Secret::new),
                extra,
                ..ConnectionConfig::default()
            };
            add_connection(&mut config, conn_id, connection, default)
        }
        ConnectionSubcommands::Remove { conn_id } => {
            config.remove_connection(&conn_id)?;
            println!("{} Connection '{}' removed", "✓".bright_green().bold(), conn_id.bright_green().bold());
            Ok(())
        }
    }
}

fn list_connections(config: &Config) -> Result<()> {
    let connections = config.list_connections();

    if connections.is_empty() {
        println!("  {}", "⚠️  No connections configured".bright_yellow().bold());
        println!("  {}", "Add one with 'kusto-conn connections add'.".dimmed());
        return Ok(());
    }

    println!();
    println!("  {}", "Configured connections:".bright_white().bold());
    for conn_id in connections {
        let connection = &config.connections[conn_id];
        let (marker, id, default_text) = if config.default_connection.as_ref() == Some(conn_id) {
            ("●", conn_id.bright_green().bold(), " (default)".bright_green())
        } else {
            ("○", conn_id.white(), "".white())
        };
        let method = connection.auth_method().unwrap_or_else(|| "?".to_string());
        println!(
            "  {} {} → {} ({}){}",
            marker.bright_green(),
            id,
            connection.host.as_deref().unwrap_or("<no host>").cyan(),
            method.bright_yellow(),
            default_text
        );
    }
    println!();

    Ok(())
}

fn show_connection(config: &Config, conn_id: &str, as_uri: bool, show_secrets: bool) -> Result<()> {
    let connection = config
        .get_connection(conn_id)?
        .ok_or_else(|| anyhow::anyhow!("Connection '{}' not found", conn_id))?;

    println!("{}", connection.render(as_uri, show_secrets)?);
    Ok(())
}

fn add_connection(
    config: &mut Config,
    conn_id: String,
    connection: ConnectionConfig,
    set_default: bool,
) -> Result<()> {
    let descriptor = config.add_validated_connection(conn_id.clone(), connection, set_default)?;
    println!(
        "{} Connection '{}' added ({})",
        "✓".bright_green().bold(),
        conn_id.bright_green().bold(),
        descriptor.method().as_str()
    );

    if set_default {
        println!("{} Set '{}' as default connection", "✓".bright_green().bold(), conn_id.bright_green().bold());
    }

    Ok(())
}
