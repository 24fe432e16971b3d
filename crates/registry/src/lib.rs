//! Request-scoped DynamoDB connection and table registry.
//!
//! A [`Registry`] is created once per process. Every inbound request owns a
//! [`Scope`]; the first time a request asks for its connection or tables they are
//! built and cached on that scope, later calls in the same request reuse them.
//!
//! ```no_run
//! use dynamo_registry::{Application, Environment, Registry, Scope, Settings};
//! use dynamo_registry::tables::{KeyAttribute, TableDescriptor};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let settings = Settings::new()
//!     .with_table(TableDescriptor::new("users", KeyAttribute::string("id")));
//! let app = Application::from_settings("api", settings, &Environment::process())?;
//! let registry = Registry::new().with_app(app);
//!
//! let scope = Scope::new();
//! let users = registry.table(&scope, "users").await?;
//! assert!(std::sync::Arc::ptr_eq(users.connection(), &registry.connection(&scope).await?));
//! # Ok(())
//! # }
//! ```

pub mod aws;
#[cfg(feature = "axum")]
pub mod extract;
mod registry;
pub mod report;

#[cfg(test)]
mod mock;

pub use dynamo_registry_core::config::{self, ConfigurationError, DynamoConfig, Environment, Settings};
pub use dynamo_registry_core::connection::{ClientError, ConnectParams, Connector};
pub use dynamo_registry_core::error::{RegistryError, Result};
pub use dynamo_registry_core::tables::{self, TableDescriptor};
pub use dynamo_registry_core::Application;

pub use aws::{AwsConnection, AwsConnector};
pub use registry::Registry;

/// Scope, table handle and table map specialised to the AWS connector.
pub type Scope<C = AwsConnection> = dynamo_registry_core::Scope<C>;
pub type TableHandle<C = AwsConnection> = dynamo_registry_core::TableHandle<C>;
pub type TableMap<C = AwsConnection> = dynamo_registry_core::TableMap<C>;
pub use dynamo_registry_core::ScopeId;
