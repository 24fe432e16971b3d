//! Recording connector for tests.
//!
//! Keeps an in-memory set of "existing" tables so create/destroy sequences can be
//! checked without a DynamoDB endpoint.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dynamo_registry_core::{ClientError, ConnectParams, Connector, TableDescriptor};

/// Connection handed out by [`RecordingConnector`].
#[derive(Debug)]
pub struct MockConnection {
    /// Sequence number, unique per connector.
    pub id: usize,
    /// Parameters the connection was built with.
    pub params: ConnectParams,
}

#[derive(Debug, Default)]
pub struct RecordingConnector {
    connects: AtomicUsize,
    existing: Mutex<BTreeSet<String>>,
    fail_connect: Mutex<Option<String>>,
    fail_create: Mutex<Option<String>>,
    fail_delete: Mutex<Option<String>>,
}

impl RecordingConnector {
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Tables currently "existing", sorted by name.
    pub fn existing_tables(&self) -> Vec<String> {
        self.existing.lock().unwrap().iter().cloned().collect()
    }

    /// Makes the next `connect` fail with `message`.
    pub fn fail_next_connect(&self, message: &str) {
        *self.fail_connect.lock().unwrap() = Some(message.to_string());
    }

    /// Makes `create_table` fail for `table_name`.
    pub fn fail_create(&self, table_name: &str) {
        *self.fail_create.lock().unwrap() = Some(table_name.to_string());
    }

    /// Makes `delete_table` fail for `table_name`.
    pub fn fail_delete(&self, table_name: &str) {
        *self.fail_delete.lock().unwrap() = Some(table_name.to_string());
    }
}

#[async_trait]
impl Connector for RecordingConnector {
    type Connection = MockConnection;

    async fn connect(&self, params: &ConnectParams) -> Result<MockConnection, ClientError> {
        if let Some(message) = self.fail_connect.lock().unwrap().take() {
            return Err(ClientError::new(message));
        }

        let id = self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(MockConnection {
            id,
            params: params.clone(),
        })
    }

    async fn create_table(
        &self,
        _connection: &MockConnection,
        table: &TableDescriptor,
    ) -> Result<(), ClientError> {
        if self.fail_create.lock().unwrap().as_deref() == Some(table.name.as_str()) {
            return Err(ClientError::new(format!(
                "ResourceInUseException: Table already exists: {}",
                table.name
            )));
        }

        self.existing.lock().unwrap().insert(table.name.clone());
        Ok(())
    }

    async fn delete_table(
        &self,
        _connection: &MockConnection,
        table_name: &str,
    ) -> Result<(), ClientError> {
        if self.fail_delete.lock().unwrap().as_deref() == Some(table_name) {
            return Err(ClientError::new(format!(
                "ResourceNotFoundException: Requested resource not found: Table: {table_name} not found"
            )));
        }

        self.existing.lock().unwrap().remove(table_name);
        Ok(())
    }
}
