use thiserror::Error;

/// Errors raised while validating the merged settings.
///
/// These always surface at startup, before any scope asks for a connection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("You must specify at least one Dynamo table to use.")]
    NoTables,
    #[error("If you have enabled Dynamo local, you must specify the host and port.")]
    LocalEndpointIncomplete,
    #[error("Invalid DYNAMO_LOCAL_PORT '{value}': expected an integer between 1 and 65535")]
    InvalidPort { value: String },
    #[error("Table '{name}' is declared more than once")]
    DuplicateTable { name: String },
    #[error("Table '{table}' declares key attribute '{attribute}' with conflicting types")]
    ConflictingAttributeType { table: String, attribute: String },
}
