use std::fmt;
use std::sync::Arc;

use crate::config::{validate, ConfigurationError, DynamoConfig, Environment, Settings};

/// The host application a registry serves: a name plus its validated configuration.
///
/// Cheap to clone; clones share the same configuration.
#[derive(Clone)]
pub struct Application {
    name: Arc<str>,
    config: Arc<DynamoConfig>,
}

impl Application {
    pub fn new(name: impl Into<String>, config: DynamoConfig) -> Self {
        Self {
            name: Arc::from(name.into()),
            config: Arc::new(config),
        }
    }

    /// Fills the settings' defaults from `env`, validates them and wraps the result.
    ///
    /// Configuration problems surface here, at startup, never during request handling.
    pub fn from_settings(
        name: impl Into<String>,
        mut settings: Settings,
        env: &Environment,
    ) -> Result<Self, ConfigurationError> {
        settings.initialize(env);
        let config = validate(&settings)?;
        Ok(Self::new(name, config))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &DynamoConfig {
        &self.config
    }

    /// Whether both handles point at the same application instance.
    pub fn same_as(&self, other: &Application) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("region", &self.config.region())
            .field("enable_local", &self.config.enable_local())
            .finish_non_exhaustive()
    }
}
