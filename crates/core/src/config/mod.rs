//! Layered configuration.
//!
//! Options flow through two stages:
//!
//! 1. [`Settings`] holds what the host application declared. [`Settings::initialize`]
//!    fills the gaps from the [`Environment`] and fixed defaults ("set if absent").
//! 2. [`validate`] checks the merged settings once, at startup, and freezes them into
//!    an immutable [`DynamoConfig`].
//!
//! Precedence is explicit settings > environment > fixed defaults.

mod environment;
mod error;
mod settings;
mod validation;

pub use environment::Environment;
pub use error::ConfigurationError;
pub use settings::Settings;
pub use validation::{validate, DynamoConfig};

/// Region used when neither the settings nor `AWS_REGION` provide one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Environment variable names backing the configuration defaults.
pub mod keys {
    pub const ENABLE_LOCAL: &str = "DYNAMO_ENABLE_LOCAL";
    pub const LOCAL_HOST: &str = "DYNAMO_LOCAL_HOST";
    pub const LOCAL_PORT: &str = "DYNAMO_LOCAL_PORT";
    pub const ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
    pub const SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
    pub const REGION: &str = "AWS_REGION";
}
