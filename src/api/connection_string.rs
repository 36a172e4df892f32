//! Kusto connection string rendering
//!
//! A descriptor renders as `Keyword=value` pairs joined by `;`, the format
//! Kusto clients accept. Secrets can be masked for display and logging.

use super::constants::keywords;
use super::models::{AuthParams, ConnectionDescriptor, REDACTED, Secret};

impl ConnectionDescriptor {
    /// Connection string including secret values
    pub fn connection_string(&self) -> String {
        render(self, false)
    }

    /// Connection string with secret values masked
    pub fn redacted_connection_string(&self) -> String {
        render(self, true)
    }
}

fn render(descriptor: &ConnectionDescriptor, redact: bool) -> String {
    let secret = |value: &Secret| -> String {
        if redact {
            REDACTED.to_string()
        } else {
            value.expose().to_string()
        }
    };

    let mut pairs: Vec<(&str, String)> = vec![(keywords::DATA_SOURCE, descriptor.host().to_string())];

    match descriptor.params() {
        AuthParams::Credentials {
            user,
            password,
            tenant,
        } => {
            pairs.push((keywords::FEDERATED_SECURITY, "True".to_string()));
            pairs.push((keywords::USER_ID, user.clone()));
            pairs.push((keywords::PASSWORD, secret(password)));
            pairs.push((keywords::AUTHORITY_ID, tenant.clone()));
        }
        AuthParams::ApplicationKey {
            client_id,
            client_secret,
            tenant,
        } => {
            pairs.push((keywords::FEDERATED_SECURITY, "True".to_string()));
            pairs.push((keywords::APPLICATION_CLIENT_ID, client_id.clone()));
            pairs.push((keywords::APPLICATION_KEY, secret(client_secret)));
            if let Some(tenant) = tenant {
                pairs.push((keywords::AUTHORITY_ID, tenant.clone()));
            }
        }
        AuthParams::ApplicationCertificate {
            client_id,
            certificate_pem,
            thumbprint,
            tenant,
        } => {
            pairs.push((keywords::FEDERATED_SECURITY, "True".to_string()));
            pairs.push((keywords::APPLICATION_CLIENT_ID, client_id.clone()));
            pairs.push((keywords::APPLICATION_CERTIFICATE, secret(certificate_pem)));
            pairs.push((keywords::APPLICATION_CERTIFICATE_THUMBPRINT, thumbprint.clone()));
            if let Some(tenant) = tenant {
                pairs.push((keywords::AUTHORITY_ID, tenant.clone()));
            }
        }
        AuthParams::DeviceCode => {
            pairs.push((keywords::FEDERATED_SECURITY, "True".to_string()));
        }
        // The credential object is handed to the client separately
        AuthParams::ExternalTokenCredential => {}
    }

    pairs
        .into_iter()
        .map(|(keyword, value)| format!("{}={}", keyword, quote(&value)))
        .collect::<Vec<_>>()
        .join(";")
}

/// Wrap values holding `;` or `"` in double quotes, doubling inner quotes
fn quote(value: &str) -> String {
    if value.contains(';') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
