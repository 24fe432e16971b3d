use std::fmt;

use crate::config::DynamoConfig;

/// Static access key pair. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    access_key_id: String,
    secret_access_key: String,
}

impl StaticCredentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

/// Host and port of a local emulator endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEndpoint {
    pub host: String,
    pub port: u16,
}

/// Everything handed to the client library when a connection is built.
///
/// Optional parts are `None` when they must not be passed at all, letting the client
/// fall back to its own discovery (credential chain, regional endpoint).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    pub region: String,
    pub credentials: Option<StaticCredentials>,
    pub endpoint: Option<LocalEndpoint>,
    /// `false` only in local mode.
    pub secure: bool,
}

impl ConnectParams {
    /// Derives connection parameters from a validated configuration.
    ///
    /// - Credentials are passed only when both the key id and the secret are non-empty.
    /// - Host and port are passed only in local mode, even if configured otherwise.
    /// - Transport is secure unless local mode is enabled.
    pub fn from_config(config: &DynamoConfig) -> Self {
        let credentials = match (config.access_key_id(), config.secret_access_key()) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some(StaticCredentials::new(id, secret))
            }
            _ => None,
        };

        let endpoint = if config.enable_local() {
            match (config.local_host(), config.local_port()) {
                (Some(host), Some(port)) => Some(LocalEndpoint {
                    host: host.to_string(),
                    port,
                }),
                _ => None,
            }
        } else {
            None
        };

        Self {
            region: config.region().to_string(),
            credentials,
            endpoint,
            secure: !config.enable_local(),
        }
    }

    /// Endpoint override as a URL, `None` when the regional endpoint should be used.
    pub fn endpoint_url(&self) -> Option<String> {
        self.endpoint.as_ref().map(|endpoint| {
            let scheme = if self.secure { "https" } else { "http" };
            format!("{scheme}://{}:{}", endpoint.host, endpoint.port)
        })
    }

    /// Human readable target, for logs and the CLI.
    pub fn target_display(&self) -> String {
        match self.endpoint_url() {
            Some(url) => format!("Local DynamoDB ({url})"),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}
