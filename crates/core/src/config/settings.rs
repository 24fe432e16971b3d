use crate::tables::TableDescriptor;

use super::{keys, validate, ConfigurationError, DynamoConfig, Environment, DEFAULT_REGION};

/// Options declared by the host application, before validation.
///
/// Every field is optional; [`Settings::initialize`] fills the missing ones from the
/// environment and fixed defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// `DYNAMO_TABLES`
    pub tables: Option<Vec<TableDescriptor>>,
    /// `DYNAMO_ENABLE_LOCAL`
    ///
    /// Only `1`, `true`, `yes` and `on` (any case) enable local mode. Other non-empty
    /// values such as `false`, `0` or `enabled` leave it disabled, unlike loaders that
    /// treat any non-empty string as true.
    pub enable_local: Option<bool>,
    /// `DYNAMO_LOCAL_HOST`
    pub local_host: Option<String>,
    /// `DYNAMO_LOCAL_PORT`, kept raw and coerced to an integer during validation.
    pub local_port: Option<String>,
    /// `AWS_ACCESS_KEY_ID`
    pub access_key_id: Option<String>,
    /// `AWS_SECRET_ACCESS_KEY`
    pub secret_access_key: Option<String>,
    /// `AWS_REGION`
    pub region: Option<String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(mut self, tables: impl IntoIterator<Item = TableDescriptor>) -> Self {
        self.tables = Some(tables.into_iter().collect());
        self
    }

    /// Appends a table to the declared list.
    pub fn with_table(mut self, table: TableDescriptor) -> Self {
        self.tables.get_or_insert_with(Vec::new).push(table);
        self
    }

    pub fn with_enable_local(mut self, enable: bool) -> Self {
        self.enable_local = Some(enable);
        self
    }

    pub fn with_local_host(mut self, host: impl Into<String>) -> Self {
        self.local_host = Some(host.into());
        self
    }

    pub fn with_local_port(mut self, port: impl ToString) -> Self {
        self.local_port = Some(port.to_string());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Fills every unset option from `env`, falling back to fixed defaults.
    ///
    /// Options that are already set are never touched, so calling this twice is a no-op.
    pub fn initialize(&mut self, env: &Environment) {
        self.tables.get_or_insert_with(Vec::new);
        if self.enable_local.is_none() {
            self.enable_local = Some(env.flag(keys::ENABLE_LOCAL).unwrap_or(false));
        }
        if self.local_host.is_none() {
            self.local_host = env.var(keys::LOCAL_HOST);
        }
        if self.local_port.is_none() {
            self.local_port = env.var(keys::LOCAL_PORT);
        }
        if self.access_key_id.is_none() {
            self.access_key_id = env.var(keys::ACCESS_KEY_ID);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = env.var(keys::SECRET_ACCESS_KEY);
        }
        if self.region.is_none() {
            self.region = Some(
                env.var(keys::REGION)
                    .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            );
        }
    }

    /// Runs [`Settings::initialize`] followed by [`validate`].
    pub fn load(mut self, env: &Environment) -> Result<DynamoConfig, ConfigurationError> {
        self.initialize(env);
        validate(&self)
    }
}
