//! Connection form metadata
//!
//! Describes how a connection-editing form should present an Azure Data
//! Explorer record: which standard fields to hide, how to relabel the rest,
//! placeholder text, and the extra widgets for the options map.

use serde::Serialize;

use super::constants::{keys, legacy_key};
use super::models::AuthMethod;

/// Standard record fields; these never take the legacy prefix
const STANDARD_FIELDS: [&str; 6] = ["host", "schema", "login", "password", "port", "extra"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub key: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldBehaviour {
    pub hidden_fields: Vec<String>,
    pub relabeling: Vec<(String, String)>,
    pub placeholders: Vec<Placeholder>,
}

impl FieldBehaviour {
    pub fn placeholder_keys(&self) -> Vec<&str> {
        self.placeholders.iter().map(|p| p.key.as_str()).collect()
    }

    /// Copy with prefixed keys for non-standard fields, for older form renderers
    pub fn with_legacy_prefixes(&self) -> Self {
        let prefix = |key: &str| -> String {
            if STANDARD_FIELDS.contains(&key) {
                key.to_string()
            } else {
                legacy_key(key)
            }
        };

        Self {
            hidden_fields: self.hidden_fields.iter().map(|k| prefix(k.as_str())).collect(),
            relabeling: self
                .relabeling
                .iter()
                .map(|(k, v)| (prefix(k.as_str()), v.clone()))
                .collect(),
            placeholders: self
                .placeholders
                .iter()
                .map(|p| Placeholder {
                    key: prefix(p.key.as_str()),
                    text: p.text.clone(),
                })
                .collect(),
        }
    }
}

/// A form widget bound to a key of the options map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormWidget {
    pub key: &'static str,
    pub label: &'static str,
    pub secret: bool,
}

pub fn ui_field_behaviour() -> FieldBehaviour {
    let methods = AuthMethod::ALL
        .iter()
        .map(AuthMethod::as_str)
        .collect::<Vec<_>>()
        .join("/");

    let placeholder = |key: &str, text: &str| Placeholder {
        key: key.to_string(),
        text: text.to_string(),
    };

    FieldBehaviour {
        hidden_fields: vec!["schema".to_string(), "port".to_string(), "extra".to_string()],
        relabeling: vec![
            (keys::LOGIN.to_string(), "Username".to_string()),
            (keys::HOST.to_string(), "Data Explorer Cluster URL".to_string()),
        ],
        placeholders: vec![
            placeholder(keys::LOGIN, "Varies with authentication method"),
            placeholder(keys::PASSWORD, "Varies with authentication method"),
            placeholder(keys::AUTH_METHOD, &methods),
            placeholder(keys::TENANT, "Used with AAD_APP/AAD_APP_CERT/AAD_CREDS"),
            placeholder(keys::CERTIFICATE, "Used with AAD_APP_CERT"),
            placeholder(keys::THUMBPRINT, "Used with AAD_APP_CERT"),
        ],
    }
}

pub fn connection_form_widgets() -> Vec<FormWidget> {
    vec![
        FormWidget {
            key: keys::TENANT,
            label: "Tenant ID",
            secret: false,
        },
        FormWidget {
            key: keys::AUTH_METHOD,
            label: "Authentication Method",
            secret: false,
        },
        FormWidget {
            key: keys::CERTIFICATE,
            label: "Application PEM Certificate",
            secret: true,
        },
        FormWidget {
            key: keys::THUMBPRINT,
            label: "Application Certificate Thumbprint",
            secret: false,
        },
    ]
}
