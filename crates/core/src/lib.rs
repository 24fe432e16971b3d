//! Core types for `dynamo_registry`.
//!
//! Everything in this crate is pure: configuration layering and validation,
//! table descriptors, connection parameter derivation and the per-scope cache.
//! The I/O lives behind the [`connection::Connector`] trait, implemented in the
//! `dynamo_registry` crate.

pub mod application;
pub mod config;
pub mod connection;
pub mod error;
pub mod scope;
pub mod tables;

pub use application::Application;
pub use config::{ConfigurationError, DynamoConfig, Environment, Settings};
pub use connection::{ClientError, ConnectParams, Connector, LocalEndpoint, StaticCredentials};
pub use error::{RegistryError, Result};
pub use scope::{Scope, ScopeId};
pub use tables::{TableDescriptor, TableHandle, TableMap};
