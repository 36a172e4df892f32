use super::constants::keys;
use super::error::{ConfigurationError, ConfigurationResult};
use super::models::{
    AuthMethod, AuthParams, ConnectionDescriptor, ConnectionOptions, ConnectionRecord, Secret,
};

/// Turns connection records into validated descriptors
///
/// Resolution is pure: no network, no environment reads, no client objects.
pub struct AuthResolver;

impl AuthResolver {
    pub fn resolve(record: &ConnectionRecord) -> ConfigurationResult<ConnectionDescriptor> {
        resolve(
            record.host(),
            record.login(),
            record.password(),
            &record.options,
        )
    }
}

/// Resolve the flat parts of a connection record
pub fn resolve(
    host: Option<&str>,
    login: Option<&str>,
    password: Option<&Secret>,
    options: &ConnectionOptions,
) -> ConfigurationResult<ConnectionDescriptor> {
    let host = host
        .filter(|h| !h.is_empty())
        .ok_or(ConfigurationError::MissingHost)?;

    let method: AuthMethod = options
        .get(keys::AUTH_METHOD)
        .ok_or(ConfigurationError::MissingAuthMethod {
            key: keys::AUTH_METHOD,
        })?
        .parse()?;

    let fields = Fields {
        method,
        login: login.filter(|l| !l.is_empty()),
        password: password.filter(|p| !p.is_empty()),
        options,
    };

    let params = match method {
        AuthMethod::Credentials => AuthParams::Credentials {
            user: fields.login()?,
            password: fields.password()?,
            tenant: fields.required(keys::TENANT)?,
        },
        AuthMethod::ApplicationKey => AuthParams::ApplicationKey {
            client_id: fields.login()?,
            client_secret: fields.password()?,
            tenant: fields.optional(keys::TENANT),
        },
        AuthMethod::ApplicationCertificate => AuthParams::ApplicationCertificate {
            client_id: fields.login()?,
            certificate_pem: Secret::new(fields.required(keys::CERTIFICATE)?),
            thumbprint: fields.required(keys::THUMBPRINT)?,
            tenant: fields.optional(keys::TENANT),
        },
        AuthMethod::DeviceCode => AuthParams::DeviceCode,
        AuthMethod::ExternalTokenCredential => AuthParams::ExternalTokenCredential,
    };

    log::debug!("Resolved connection to {} using {}", host, method);
    Ok(ConnectionDescriptor::new(host.to_string(), params))
}

/// Field accessors that fail with the method and field name
struct Fields<'a> {
    method: AuthMethod,
    login: Option<&'a str>,
    password: Option<&'a Secret>,
    options: &'a ConnectionOptions,
}

impl Fields<'_> {
    fn missing(&self, field: &'static str) -> ConfigurationError {
        ConfigurationError::MissingRequiredField {
            method: self.method,
            field,
        }
    }

    fn login(&self) -> ConfigurationResult<String> {
        self.login
            .map(str::to_string)
            .ok_or_else(|| self.missing(keys::LOGIN))
    }

    fn password(&self) -> ConfigurationResult<Secret> {
        self.password
            .cloned()
            .ok_or_else(|| self.missing(keys::PASSWORD))
    }

    fn required(&self, key: &'static str) -> ConfigurationResult<String> {
        self.optional(key).ok_or_else(|| self.missing(key))
    }

    fn optional(&self, key: &str) -> Option<String> {
        self.options.get(key).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "https://help.kusto.windows.net";

    fn record(method: &str) -> ConnectionRecord {
        ConnectionRecord::new(HOST).with_option(keys::AUTH_METHOD, method)
    }

    #[test]
    fn test_missing_host() {
        let record = ConnectionRecord::default()
            .with_login("client_id")
            .with_password("client secret")
            .with_option(keys::AUTH_METHOD, "AAD_APP");
        let err = AuthResolver::resolve(&record).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingHost);
        assert!(err.to_string().contains("Host connection option is required"));
    }

    #[test]
    fn test_empty_host_is_missing() {
        let record = ConnectionRecord::new("").with_option(keys::AUTH_METHOD, "AAD_DEVICE");
        assert_eq!(
            AuthResolver::resolve(&record).unwrap_err(),
            ConfigurationError::MissingHost
        );
    }

    #[test]
    fn test_host_checked_before_method() {
        let record = ConnectionRecord::default().with_option(keys::AUTH_METHOD, "AAD_OTHER");
        assert_eq!(
            AuthResolver::resolve(&record).unwrap_err(),
            ConfigurationError::MissingHost
        );
    }

    #[test]
    fn test_missing_method() {
        let record = ConnectionRecord::new(HOST)
            .with_login("client_id")
            .with_password("client secret");
        let err = AuthResolver::resolve(&record).unwrap_err();
        assert!(err.to_string().contains("is missing: `auth_method`"));
    }

    #[test]
    fn test_unknown_method() {
        let err = AuthResolver::resolve(&record("AAD_OTHER")).unwrap_err();
        assert_eq!(err.to_string(), "Unknown authentication method: AAD_OTHER");
    }

    #[test]
    fn test_credentials_require_tenant() {
        let record = record("AAD_CREDS")
            .with_login("user")
            .with_password("pass");
        let err = AuthResolver::resolve(&record).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingRequiredField {
                method: AuthMethod::Credentials,
                field: keys::TENANT,
            }
        );
        assert_eq!(
            err.to_string(),
            "`tenant` is required for authentication method AAD_CREDS"
        );
    }

    #[test]
    fn test_application_key_requires_password() {
        let record = record("AAD_APP").with_login("app_id");
        assert_eq!(
            AuthResolver::resolve(&record).unwrap_err(),
            ConfigurationError::MissingRequiredField {
                method: AuthMethod::ApplicationKey,
                field: keys::PASSWORD,
            }
        );
    }

    #[test]
    fn test_application_key_without_tenant() {
        let record = record("AAD_APP")
            .with_login("app_id")
            .with_password("app key");
        let descriptor = AuthResolver::resolve(&record).unwrap();
        assert_eq!(descriptor.method(), AuthMethod::ApplicationKey);
        assert_eq!(descriptor.tenant(), None);
    }

    #[test]
    fn test_certificate_requires_thumbprint() {
        let record = record("AAD_APP_CERT")
            .with_login("client_id")
            .with_option(keys::CERTIFICATE, "PEM");
        assert_eq!(
            AuthResolver::resolve(&record).unwrap_err(),
            ConfigurationError::MissingRequiredField {
                method: AuthMethod::ApplicationCertificate,
                field: keys::THUMBPRINT,
            }
        );
    }

    #[test]
    fn test_device_code_ignores_credentials() {
        let descriptor = AuthResolver::resolve(&record("AAD_DEVICE")).unwrap();
        assert_eq!(descriptor.host(), HOST);
        assert_eq!(descriptor.params(), &AuthParams::DeviceCode);
    }

    #[test]
    fn test_token_credential_needs_no_fields() {
        let descriptor = AuthResolver::resolve(&record("AZURE_TOKEN_CRED")).unwrap();
        assert_eq!(descriptor.method(), AuthMethod::ExternalTokenCredential);
    }

    #[test]
    fn test_flat_resolve_matches_record_resolve() {
        let options: ConnectionOptions = [("auth_method", "AAD_DEVICE")].into_iter().collect();
        let flat = resolve(Some(HOST), None, None, &options).unwrap();
        let record = AuthResolver::resolve(&record("AAD_DEVICE")).unwrap();
        assert_eq!(flat, record);
    }
}
