//! Connection parameters and the client library seam.

mod error;
mod params;
mod traits;

pub use error::ClientError;
pub use params::{ConnectParams, LocalEndpoint, StaticCredentials};
pub use traits::Connector;
