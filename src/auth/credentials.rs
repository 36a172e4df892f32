use anyhow::Result;
use log::info;

use crate::api::constants::{DEFAULT_AUTHORITY_HOST, env};
use crate::api::models::Secret;

/// Service principal credential discovered from `AZURE_*` environment variables
///
/// This is what the external client picks up for `AZURE_TOKEN_CRED`
/// connections. Resolution never reads it; callers use it to check that the
/// environment is ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentCredential {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: Secret,
    pub authority: String,
}

impl EnvironmentCredential {
    pub fn from_env() -> Result<EnvironmentCredential> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<EnvironmentCredential>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Reading token credential from environment variables");

        let required = |name: &str| -> Result<String> {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} environment variable not set", name))
        };

        let tenant_id = required(env::AZURE_TENANT_ID)?;
        let client_id = required(env::AZURE_CLIENT_ID)?;
        let client_secret = required(env::AZURE_CLIENT_SECRET)?;
        let authority = lookup(env::AZURE_AUTHORITY_HOST)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_string());

        Ok(EnvironmentCredential {
            tenant_id,
            client_id,
            client_secret: Secret::new(client_secret),
            authority,
        })
    }
}
