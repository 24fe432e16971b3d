use std::time::Duration;

use thiserror::Error;

/// A table did not reach the expected state before the wait policy ran out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Timeout waiting for table '{table_name}' to become {expected} after {waited:?}")]
pub struct TableWaitTimeout {
    pub table_name: String,
    pub expected: &'static str,
    pub waited: Duration,
}
