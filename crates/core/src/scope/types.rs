//! Pure types for the request-scoped cache.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::application::Application;
use crate::tables::TableMap;

/// Unique identifier for a scope, used for tracing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(Uuid);

impl ScopeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for ScopeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lifetime boundary (usually one inbound request) owning the cached connection and
/// table handles.
///
/// Each slot is built at most once, even when several tasks race on it. Dropping the
/// scope drops whatever it cached.
pub struct Scope<C> {
    id: ScopeId,
    app: Option<Application>,
    connection: OnceCell<Arc<C>>,
    tables: OnceCell<TableMap<C>>,
}

impl<C> Scope<C> {
    pub fn new() -> Self {
        Self::with_id(ScopeId::new())
    }

    pub fn with_id(id: ScopeId) -> Self {
        Self {
            id,
            app: None,
            connection: OnceCell::new(),
            tables: OnceCell::new(),
        }
    }

    /// Attaches the application serving this scope.
    pub fn with_app(mut self, app: Application) -> Self {
        self.app = Some(app);
        self
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn app(&self) -> Option<&Application> {
        self.app.as_ref()
    }

    /// Returns the cached connection, building it with `init` on first access.
    ///
    /// A failed `init` leaves the slot empty so a later call can try again.
    pub async fn connection_or_try_init<F, Fut, E>(&self, init: F) -> Result<Arc<C>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, E>>,
    {
        self.connection
            .get_or_try_init(move || async move { init().await.map(Arc::new) })
            .await
            .map(Arc::clone)
    }

    /// Returns the cached table map, building it with `init` on first access.
    pub async fn tables_or_try_init<F, Fut, E>(&self, init: F) -> Result<&TableMap<C>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TableMap<C>, E>>,
    {
        self.tables.get_or_try_init(init).await
    }

    /// The connection, if one was already built in this scope.
    pub fn cached_connection(&self) -> Option<&Arc<C>> {
        self.connection.get()
    }

    /// The table map, if it was already built in this scope.
    pub fn cached_tables(&self) -> Option<&TableMap<C>> {
        self.tables.get()
    }
}

impl<C> Default for Scope<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Scope<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id)
            .field("app", &self.app.as_ref().map(Application::name))
            .field("connected", &self.connection.initialized())
            .field("tables", &self.tables.get())
            .finish()
    }
}
