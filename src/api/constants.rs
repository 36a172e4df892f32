//! Constants shared by resolution, connection sources and the CLI

/// Connection type name used for Azure Data Explorer records
pub const CONN_TYPE: &str = "azure_data_explorer";

/// Prefix carried by option keys written before plain keys were supported
pub const LEGACY_PREFIX: &str = "extra__azure_data_explorer__";

/// Option keys recognized on a connection record
pub mod keys {
    pub const LOGIN: &str = "login";
    pub const PASSWORD: &str = "password";
    pub const HOST: &str = "host";
    pub const AUTH_METHOD: &str = "auth_method";
    pub const TENANT: &str = "tenant";
    pub const CERTIFICATE: &str = "certificate";
    pub const THUMBPRINT: &str = "thumbprint";
}

/// Environment variables
pub mod env {
    /// Prefix of variables holding a connection as URI or JSON
    pub const CONN_PREFIX: &str = "KUSTO_CONN_";

    pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
    pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
    pub const AZURE_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
    pub const AZURE_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
}

/// Authority used when `AZURE_AUTHORITY_HOST` is not set
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Keywords understood by Kusto connection strings
pub mod keywords {
    pub const DATA_SOURCE: &str = "Data Source";
    pub const FEDERATED_SECURITY: &str = "AAD Federated Security";
    pub const USER_ID: &str = "AAD User ID";
    pub const PASSWORD: &str = "Password";
    pub const APPLICATION_CLIENT_ID: &str = "Application Client Id";
    pub const APPLICATION_KEY: &str = "Application Key";
    pub const APPLICATION_CERTIFICATE: &str = "Application Certificate PrivateKey";
    pub const APPLICATION_CERTIFICATE_THUMBPRINT: &str = "Application Certificate Thumbprint";
    pub const AUTHORITY_ID: &str = "Authority Id";
}

/// Build the environment variable name for a connection id
pub fn conn_env_var(conn_id: &str) -> String {
    format!("{}{}", env::CONN_PREFIX, conn_id.to_uppercase())
}

/// Build the legacy prefixed form of an option key
pub fn legacy_key(key: &str) -> String {
    format!("{}{}", LEGACY_PREFIX, key)
}

/// Whether an option holds secret material, in plain or legacy form
pub fn is_secret_option(key: &str) -> bool {
    let key = key.strip_prefix(LEGACY_PREFIX).unwrap_or(key);
    key == keys::CERTIFICATE
}
