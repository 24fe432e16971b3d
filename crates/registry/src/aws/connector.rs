use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{IndexStatus, TableStatus};
use dynamo_registry_core::{ClientError, ConnectParams, Connector, TableDescriptor};

use super::client::{create_client, AwsConnection};
use super::error::TableWaitTimeout;
use super::schema::CreateTableRequest;

/// How long to poll `DescribeTable` while waiting for a table state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            delay: Duration::from_secs(2),
        }
    }
}

/// Connector backed by `aws-sdk-dynamodb`.
#[derive(Debug, Clone, Default)]
pub struct AwsConnector {
    wait: WaitPolicy,
}

impl AwsConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wait_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    /// Whether the table exists. `ResourceNotFoundException` maps to `false`, any other
    /// failure is returned.
    pub async fn table_exists(
        &self,
        connection: &AwsConnection,
        table_name: &str,
    ) -> Result<bool, ClientError> {
        Ok(describe(connection, table_name).await?.is_some())
    }

    /// Polls until the table and all of its global indexes are `ACTIVE`.
    pub async fn wait_for_active(
        &self,
        connection: &AwsConnection,
        table_name: &str,
    ) -> Result<(), ClientError> {
        for _ in 0..self.wait.max_attempts {
            if let Some(state) = describe(connection, table_name).await? {
                if state.is_active() {
                    return Ok(());
                }
            }
            tokio::time::sleep(self.wait.delay).await;
        }

        Err(self.timeout(table_name, "active"))
    }

    /// Polls until `DescribeTable` no longer finds the table.
    pub async fn wait_for_deleted(
        &self,
        connection: &AwsConnection,
        table_name: &str,
    ) -> Result<(), ClientError> {
        for _ in 0..self.wait.max_attempts {
            if describe(connection, table_name).await?.is_none() {
                return Ok(());
            }
            tokio::time::sleep(self.wait.delay).await;
        }

        Err(self.timeout(table_name, "deleted"))
    }

    fn timeout(&self, table_name: &str, expected: &'static str) -> ClientError {
        ClientError::new(TableWaitTimeout {
            table_name: table_name.to_string(),
            expected,
            waited: self.wait.delay * self.wait.max_attempts,
        })
    }
}

#[async_trait]
impl Connector for AwsConnector {
    type Connection = AwsConnection;

    async fn connect(&self, params: &ConnectParams) -> Result<AwsConnection, ClientError> {
        let client = create_client(params).await;
        Ok(AwsConnection::new(client, params.clone()))
    }

    async fn create_table(
        &self,
        connection: &AwsConnection,
        table: &TableDescriptor,
    ) -> Result<(), ClientError> {
        CreateTableRequest::from_descriptor(table)
            .map_err(ClientError::new)?
            .send(connection.client())
            .await
    }

    async fn delete_table(
        &self,
        connection: &AwsConnection,
        table_name: &str,
    ) -> Result<(), ClientError> {
        connection
            .client()
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(ClientError::new)?;
        Ok(())
    }
}

/// Status snapshot of a table and its global indexes.
struct TableState {
    status: Option<TableStatus>,
    index_statuses: Vec<Option<IndexStatus>>,
}

impl TableState {
    fn is_active(&self) -> bool {
        self.status == Some(TableStatus::Active)
            && self
                .index_statuses
                .iter()
                .all(|s| s.as_ref().is_none_or(|s| *s == IndexStatus::Active))
    }
}

/// Fetches current table state, returns `None` if the table doesn't exist.
async fn describe(
    connection: &AwsConnection,
    table_name: &str,
) -> Result<Option<TableState>, ClientError> {
    match connection
        .client()
        .describe_table()
        .table_name(table_name)
        .send()
        .await
    {
        Ok(response) => Ok(response.table().map(|table| TableState {
            status: table.table_status().cloned(),
            index_statuses: table
                .global_secondary_indexes()
                .iter()
                .map(|gsi| gsi.index_status().cloned())
                .collect(),
        })),
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception()) =>
        {
            Ok(None)
        }
        Err(err) => Err(ClientError::new(err)),
    }
}
