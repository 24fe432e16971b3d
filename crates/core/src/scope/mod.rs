//! Caller-owned scope used as per-request cache storage.

mod types;

pub use types::{Scope, ScopeId};
