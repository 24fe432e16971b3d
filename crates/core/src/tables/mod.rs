//! Table descriptors and the handles bound to a scope's connection.

mod handle;
mod types;

pub use handle::{TableHandle, TableMap, TABLE_ATTRIBUTE_PREFIX};
pub use types::{
    AttributeType, Capacity, GlobalIndex, KeyAttribute, LocalIndex, Projection, TableDescriptor,
    Throughput,
};
