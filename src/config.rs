use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::auth::AuthResolver;
use crate::api::constants::{conn_env_var, is_secret_option, keys};
use crate::api::error::ConfigurationResult;
use crate::api::models::{ConnectionDescriptor, ConnectionOptions, ConnectionRecord, REDACTED, Secret};

pub mod compat;
pub mod uri;

/// A connection as stored, before legacy option keys are folded
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conn_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Secret>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// A record ready for resolution, with the warnings raised while folding its options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConnection {
    pub record: ConnectionRecord,
    pub warnings: Vec<String>,
}

impl ConnectionConfig {
    pub fn to_record(&self) -> LoadedConnection {
        let normalized = compat::normalize_extras(&self.extra);

        LoadedConnection {
            record: ConnectionRecord {
                conn_type: self.conn_type.clone(),
                host: self.host.clone(),
                login: self.login.clone(),
                password: self.password.clone(),
                options: normalized.options,
            },
            warnings: normalized.warnings,
        }
    }

    /// Fold legacy keys and resolve into a descriptor
    pub fn resolve(&self) -> ConfigurationResult<ConnectionDescriptor> {
        AuthResolver::resolve(&self.to_record().record)
    }

    /// Auth method as the resolver would read it, legacy keys included
    pub fn auth_method(&self) -> Option<String> {
        self.to_record()
            .record
            .options
            .get(keys::AUTH_METHOD)
            .map(str::to_string)
    }

    /// Copy with the password and secret options masked
    pub fn redacted(&self) -> ConnectionConfig {
        let mut redacted = self.clone();
        if redacted.password.is_some() {
            redacted.password = Some(Secret::new(REDACTED));
        }
        for (key, value) in redacted.extra.iter_mut() {
            if is_secret_option(key) {
                *value = REDACTED.to_string();
            }
        }
        redacted
    }

    /// Render for display as URI or TOML, masking secrets unless asked not to
    pub fn render(&self, as_uri: bool, show_secrets: bool) -> Result<String> {
        if as_uri {
            return Ok(if show_secrets {
                uri::to_uri(self)
            } else {
                uri::to_redacted_uri(self)
            });
        }

        let shown = if show_secrets { self.clone() } else { self.redacted() };
        toml::to_string_pretty(&shown).context("Failed to serialize connection")
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("conn_type", &self.conn_type)
            .field("host", &self.host)
            .field("login", &self.login)
            .field("password", &self.password)
            .field("schema", &self.schema)
            .field("port", &self.port)
            .field("extra", &self.extra.iter().collect::<ConnectionOptions>())
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub default_connection: Option<String>,
    #[serde(default)]
    pub connections: BTreeMap<String, ConnectionConfig>,
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("kusto-conn")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".kusto-conn")
        };

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using default config");
            return Ok(Self {
                config_path: Some(config_path.to_path_buf()),
                ..Self::default()
            });
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let mut config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        config.config_path = Some(config_path.to_path_buf());

        debug!("Loaded config with {} connections", config.connections.len());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = match &self.config_path {
            Some(path) => path.clone(),
            None => Self::get_config_path()?,
        };
        debug!("Saving config to: {:?}", config_path);

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
                fs::create_dir_all(config_dir).with_context(|| {
                    format!("Failed to create config directory: {:?}", config_dir)
                })?;
                info!("Created config directory: {:?}", config_dir);
            }
        }

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn add_connection(&mut self, conn_id: String, connection: ConnectionConfig) -> Result<()> {
        info!("Adding connection: {}", conn_id);
        self.connections.insert(conn_id.clone(), connection);

        // The first connection becomes the default
        if self.default_connection.is_none() {
            self.default_connection = Some(conn_id.clone());
            info!("Set {} as default connection", conn_id);
        }

        self.save()
    }

    /// Resolve a connection and store it only if it is valid
    pub fn add_validated_connection(
        &mut self,
        conn_id: String,
        connection: ConnectionConfig,
        set_default: bool,
    ) -> Result<ConnectionDescriptor> {
        let descriptor = connection
            .resolve()
            .with_context(|| format!("Connection '{}' is not valid", conn_id))?;

        self.add_connection(conn_id.clone(), connection)?;
        if set_default {
            self.set_default_connection(conn_id)?;
        }

        Ok(descriptor)
    }

    pub fn set_default_connection(&mut self, conn_id: String) -> Result<()> {
        if !self.connections.contains_key(&conn_id) {
            anyhow::bail!("Connection '{}' not found", conn_id);
        }

        info!("Setting default connection to: {}", conn_id);
        self.default_connection = Some(conn_id);
        self.save()
    }

    pub fn remove_connection(&mut self, conn_id: &str) -> Result<()> {
        if self.connections.remove(conn_id).is_none() {
            anyhow::bail!("Connection '{}' not found", conn_id);
        }
        info!("Removed connection: {}", conn_id);

        if self.default_connection.as_deref() == Some(conn_id) {
            warn!("Removed default connection, clearing default selection");
            self.default_connection = None;
        }

        self.save()
    }

    pub fn list_connections(&self) -> Vec<&String> {
        self.connections.keys().collect()
    }

    /// Look up a connection, environment first, then the config file
    pub fn get_connection(&self, conn_id: &str) -> Result<Option<ConnectionConfig>> {
        self.get_connection_with(conn_id, |name| std::env::var(name).ok())
    }

    pub fn get_connection_with<F>(&self, conn_id: &str, env: F) -> Result<Option<ConnectionConfig>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = conn_env_var(conn_id);
        if let Some(value) = env(&var) {
            debug!("Using connection '{}' from environment variable {}", conn_id, var);
            let connection = uri::parse_connection(&value)
                .with_context(|| format!("Failed to parse connection from {}", var))?;
            return Ok(Some(connection));
        }

        Ok(self.connections.get(conn_id).cloned())
    }
}
