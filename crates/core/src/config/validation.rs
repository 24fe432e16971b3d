use std::collections::HashSet;
use std::sync::Arc;

use crate::tables::TableDescriptor;

use super::{ConfigurationError, Settings, DEFAULT_REGION};

/// Validated, immutable configuration.
///
/// Only [`validate`] builds one, so holding a `DynamoConfig` means the invariants
/// below already hold:
///
/// - at least one table is declared and table names are unique;
/// - within a table, a key attribute name always carries the same type;
/// - in local mode both host and port are present and the port is a valid integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoConfig {
    tables: Vec<Arc<TableDescriptor>>,
    enable_local: bool,
    local_host: Option<String>,
    local_port: Option<u16>,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    region: String,
}

impl DynamoConfig {
    /// Declared tables, in declaration order.
    pub fn tables(&self) -> &[Arc<TableDescriptor>] {
        &self.tables
    }

    pub fn enable_local(&self) -> bool {
        self.enable_local
    }

    pub fn local_host(&self) -> Option<&str> {
        self.local_host.as_deref()
    }

    pub fn local_port(&self) -> Option<u16> {
        self.local_port
    }

    pub fn access_key_id(&self) -> Option<&str> {
        self.access_key_id.as_deref()
    }

    pub fn secret_access_key(&self) -> Option<&str> {
        self.secret_access_key.as_deref()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Looks up a declared table by name.
    pub fn table(&self, name: &str) -> Option<&Arc<TableDescriptor>> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Checks the merged settings and freezes them.
///
/// Must run after [`Settings::initialize`] and before any connection is built.
/// Empty strings count as absent.
pub fn validate(settings: &Settings) -> Result<DynamoConfig, ConfigurationError> {
    let tables = settings.tables.as_deref().unwrap_or_default();
    if tables.is_empty() {
        return Err(ConfigurationError::NoTables);
    }

    let mut seen = HashSet::new();
    for table in tables {
        if !seen.insert(table.name.as_str()) {
            return Err(ConfigurationError::DuplicateTable {
                name: table.name.clone(),
            });
        }
        if let Some(attribute) = table.conflicting_key_attribute() {
            return Err(ConfigurationError::ConflictingAttributeType {
                table: table.name.clone(),
                attribute: attribute.to_string(),
            });
        }
    }

    let enable_local = settings.enable_local.unwrap_or(false);
    let local_host = non_empty(&settings.local_host);
    let raw_port = non_empty(&settings.local_port);

    if enable_local && (local_host.is_none() || raw_port.is_none()) {
        return Err(ConfigurationError::LocalEndpointIncomplete);
    }

    let local_port = match raw_port {
        Some(raw) => match parse_port(&raw) {
            Some(port) => Some(port),
            None if enable_local => return Err(ConfigurationError::InvalidPort { value: raw }),
            None => {
                tracing::warn!(value = %raw, "Ignoring unparsable DYNAMO_LOCAL_PORT, local mode is disabled");
                None
            }
        },
        None => None,
    };

    Ok(DynamoConfig {
        tables: tables.iter().cloned().map(Arc::new).collect(),
        enable_local,
        local_host,
        local_port,
        access_key_id: non_empty(&settings.access_key_id),
        secret_access_key: non_empty(&settings.secret_access_key),
        region: non_empty(&settings.region).unwrap_or_else(|| DEFAULT_REGION.to_string()),
    })
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.parse::<u16>().ok().filter(|port| *port != 0)
}
