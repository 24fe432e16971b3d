//! `aws-sdk-dynamodb` implementation of the [`Connector`](dynamo_registry_core::Connector) seam.

mod client;
mod connector;
mod error;
mod schema;

pub use client::{create_client, AwsConnection};
pub use connector::{AwsConnector, WaitPolicy};
pub use error::TableWaitTimeout;
pub use schema::CreateTableRequest;
