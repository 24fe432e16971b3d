use async_trait::async_trait;

use crate::tables::TableDescriptor;

use super::{ClientError, ConnectParams};

/// The database client library, as seen by the registry.
///
/// The registry only orchestrates: it decides *when* to connect and which tables to
/// create or delete, the connector does the actual work.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connection handle shared by every table in a scope.
    type Connection: Send + Sync + 'static;

    /// Builds a connection from the given parameters.
    async fn connect(&self, params: &ConnectParams) -> Result<Self::Connection, ClientError>;

    /// Issues a create-table request using the descriptor's schema, throughput and indexes.
    async fn create_table(
        &self,
        connection: &Self::Connection,
        table: &TableDescriptor,
    ) -> Result<(), ClientError>;

    /// Issues a delete-table request.
    async fn delete_table(
        &self,
        connection: &Self::Connection,
        table_name: &str,
    ) -> Result<(), ClientError>;
}
