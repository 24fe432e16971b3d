//! The connection/table registry.

use std::sync::Arc;

use dynamo_registry_core::{
    Application, ConnectParams, Connector, RegistryError, Result, Scope, TableHandle, TableMap,
};

use crate::aws::AwsConnector;

/// Process-lifetime registry handing out per-scope connections and table handles.
///
/// The registry itself holds no per-request state: the connection and the table map
/// are cached on the [`Scope`] passed to each call and die with it.
pub struct Registry<K: Connector = AwsConnector> {
    connector: K,
    app: Option<Application>,
}

impl Registry<AwsConnector> {
    /// Creates an unbound registry using the AWS SDK.
    ///
    /// Bind an application with [`Registry::init_app`] or [`Registry::with_app`], or
    /// attach one to each scope.
    pub fn new() -> Self {
        Self::with_connector(AwsConnector::default())
    }
}

impl Default for Registry<AwsConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Connector> Registry<K> {
    pub fn with_connector(connector: K) -> Self {
        Self {
            connector,
            app: None,
        }
    }

    /// Binds the application at construction time.
    pub fn with_app(mut self, app: Application) -> Self {
        self.init_app(app);
        self
    }

    /// Binds an application after construction (deferred initialization).
    pub fn init_app(&mut self, app: Application) {
        tracing::debug!(
            app = app.name(),
            region = app.config().region(),
            tables = app.config().tables().len(),
            "Registry bound to application"
        );
        self.app = Some(app);
    }

    /// The application bound at construction, if any.
    pub fn app(&self) -> Option<&Application> {
        self.app.as_ref()
    }

    pub fn connector(&self) -> &K {
        &self.connector
    }

    /// Picks the application to serve, in priority order: `explicit`, the bound
    /// application, then the application attached to `scope`.
    pub fn resolve_application(
        &self,
        explicit: Option<&Application>,
        scope: Option<&Scope<K::Connection>>,
    ) -> Result<Application> {
        explicit
            .or(self.app.as_ref())
            .or_else(|| scope.and_then(Scope::app))
            .cloned()
            .ok_or(RegistryError::NoApplication)
    }

    /// The scope's connection, built on first access and reused afterwards.
    pub async fn connection(&self, scope: &Scope<K::Connection>) -> Result<Arc<K::Connection>> {
        scope
            .connection_or_try_init(move || async move {
                let app = self.resolve_application(None, Some(scope))?;
                let params = ConnectParams::from_config(app.config());

                tracing::debug!(
                    scope = %scope.id(),
                    target = %params.target_display(),
                    static_credentials = params.credentials.is_some(),
                    "Creating DynamoDB connection"
                );

                self.connector
                    .connect(&params)
                    .await
                    .map_err(RegistryError::from)
            })
            .await
    }

    /// The scope's table handles, all bound to [`Registry::connection`].
    pub async fn tables<'s>(
        &self,
        scope: &'s Scope<K::Connection>,
    ) -> Result<&'s TableMap<K::Connection>> {
        scope
            .tables_or_try_init(move || async move {
                let app = self.resolve_application(None, Some(scope))?;
                let connection = self.connection(scope).await?;
                let tables = TableMap::bind(app.config().tables(), connection);

                tracing::debug!(scope = %scope.id(), tables = ?tables, "Bound tables to connection");

                Ok(tables)
            })
            .await
    }

    /// A single table handle by name.
    pub async fn table(
        &self,
        scope: &Scope<K::Connection>,
        name: &str,
    ) -> Result<TableHandle<K::Connection>> {
        self.tables(scope)
            .await?
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::TableNotFound(name.to_string()))
    }

    /// Creates every declared table, in declaration order.
    ///
    /// Stops at the first failure; tables created before it are left in place.
    pub async fn create_all(&self, scope: &Scope<K::Connection>) -> Result<()> {
        for handle in self.tables(scope).await?.iter() {
            tracing::info!(scope = %scope.id(), table = handle.name(), "Creating table");

            if let Err(err) = self
                .connector
                .create_table(handle.connection(), handle.descriptor())
                .await
            {
                tracing::error!(table = handle.name(), error = %err, "Failed to create table");
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// Deletes every declared table, in declaration order.
    ///
    /// Stops at the first failure; tables deleted before it stay deleted.
    pub async fn destroy_all(&self, scope: &Scope<K::Connection>) -> Result<()> {
        for handle in self.tables(scope).await?.iter() {
            tracing::info!(scope = %scope.id(), table = handle.name(), "Deleting table");

            if let Err(err) = self
                .connector
                .delete_table(handle.connection(), handle.name())
                .await
            {
                tracing::error!(table = handle.name(), error = %err, "Failed to delete table");
                return Err(err.into());
            }
        }
        Ok(())
    }
}
