use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::{is_secret_option, keys};
use super::error::ConfigurationError;

/// Placeholder printed instead of secret values
pub const REDACTED: &str = "***";

/// A secret string that never shows up in logs or debug output
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying value
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Authentication strategies supported for a Kusto cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthMethod {
    /// AAD user name and password
    #[serde(rename = "AAD_CREDS")]
    Credentials,
    /// AAD application id and key
    #[serde(rename = "AAD_APP")]
    ApplicationKey,
    /// AAD application id and PEM certificate
    #[serde(rename = "AAD_APP_CERT")]
    ApplicationCertificate,
    /// Interactive device code flow
    #[serde(rename = "AAD_DEVICE")]
    DeviceCode,
    /// Credential discovered from the environment by the client library
    #[default]
    #[serde(rename = "AZURE_TOKEN_CRED")]
    ExternalTokenCredential,
}

impl AuthMethod {
    pub const ALL: [AuthMethod; 5] = [
        AuthMethod::ApplicationKey,
        AuthMethod::ApplicationCertificate,
        AuthMethod::Credentials,
        AuthMethod::DeviceCode,
        AuthMethod::ExternalTokenCredential,
    ];

    /// Name stored in the `auth_method` option
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Credentials => "AAD_CREDS",
            AuthMethod::ApplicationKey => "AAD_APP",
            AuthMethod::ApplicationCertificate => "AAD_APP_CERT",
            AuthMethod::DeviceCode => "AAD_DEVICE",
            AuthMethod::ExternalTokenCredential => "AZURE_TOKEN_CRED",
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match self {
            AuthMethod::Credentials => "AAD user name and password",
            AuthMethod::ApplicationKey => "AAD application key",
            AuthMethod::ApplicationCertificate => "AAD application certificate",
            AuthMethod::DeviceCode => "AAD device code",
            AuthMethod::ExternalTokenCredential => "Azure token credential from environment",
        }
    }

    /// Fields that must be present on the record, besides the host
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            AuthMethod::Credentials => &[keys::LOGIN, keys::PASSWORD, keys::TENANT],
            AuthMethod::ApplicationKey => &[keys::LOGIN, keys::PASSWORD],
            AuthMethod::ApplicationCertificate => {
                &[keys::LOGIN, keys::CERTIFICATE, keys::THUMBPRINT]
            }
            AuthMethod::DeviceCode | AuthMethod::ExternalTokenCredential => &[],
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuthMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownAuthMethod(s.to_string()))
    }
}

/// Canonical option map of a connection record
///
/// Keys are plain (`tenant`, `auth_method`, ...). Empty values read as absent.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionOptions(BTreeMap<String, String>);

impl ConnectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(key, value)| {
                let shown = if is_secret_option(key) { REDACTED } else { value.as_str() };
                (key, shown)
            }))
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConnectionOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A stored connection to a Kusto cluster, options already normalized
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionRecord {
    pub conn_type: Option<String>,
    pub host: Option<String>,
    pub login: Option<String>,
    pub password: Option<Secret>,
    pub options: ConnectionOptions,
}

impl ConnectionRecord {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::default()
        }
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<Secret>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().filter(|h| !h.is_empty())
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref().filter(|l| !l.is_empty())
    }

    pub fn password(&self) -> Option<&Secret> {
        self.password.as_ref().filter(|p| !p.is_empty())
    }
}

/// Parameters carried by a descriptor, one variant per auth method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthParams {
    Credentials {
        user: String,
        password: Secret,
        tenant: String,
    },
    ApplicationKey {
        client_id: String,
        client_secret: Secret,
        tenant: Option<String>,
    },
    ApplicationCertificate {
        client_id: String,
        certificate_pem: Secret,
        thumbprint: String,
        tenant: Option<String>,
    },
    DeviceCode,
    ExternalTokenCredential,
}

impl AuthParams {
    pub fn method(&self) -> AuthMethod {
        match self {
            AuthParams::Credentials { .. } => AuthMethod::Credentials,
            AuthParams::ApplicationKey { .. } => AuthMethod::ApplicationKey,
            AuthParams::ApplicationCertificate { .. } => AuthMethod::ApplicationCertificate,
            AuthParams::DeviceCode => AuthMethod::DeviceCode,
            AuthParams::ExternalTokenCredential => AuthMethod::ExternalTokenCredential,
        }
    }

    pub fn tenant(&self) -> Option<&str> {
        match self {
            AuthParams::Credentials { tenant, .. } => Some(tenant),
            AuthParams::ApplicationKey { tenant, .. }
            | AuthParams::ApplicationCertificate { tenant, .. } => tenant.as_deref(),
            AuthParams::DeviceCode | AuthParams::ExternalTokenCredential => None,
        }
    }
}

/// Validated result of resolving a connection record
///
/// Only the resolver builds one; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    host: String,
    params: AuthParams,
}

impl ConnectionDescriptor {
    pub(crate) fn new(host: String, params: AuthParams) -> Self {
        Self { host, params }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn method(&self) -> AuthMethod {
        self.params.method()
    }

    pub fn params(&self) -> &AuthParams {
        &self.params
    }

    pub fn tenant(&self) -> Option<&str> {
        self.params.tenant()
    }
}
