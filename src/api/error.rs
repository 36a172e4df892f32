//! Errors raised while resolving a connection record

use thiserror::Error;

use super::models::AuthMethod;

/// A connection record cannot be turned into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The record has no host, or an empty one.
    #[error("Host connection option is required")]
    MissingHost,

    /// No authentication method was configured.
    #[error("Required connection parameter is missing: `{key}`")]
    MissingAuthMethod { key: &'static str },

    /// The configured method name is not one we know.
    #[error("Unknown authentication method: {0}")]
    UnknownAuthMethod(String),

    /// The selected method needs a field the record does not carry.
    #[error("`{field}` is required for authentication method {method}")]
    MissingRequiredField {
        method: AuthMethod,
        field: &'static str,
    },
}

/// Result type alias for resolution.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
