//! Table configuration types (pure data).

use serde::{Deserialize, Serialize};

/// Caller-supplied description of a table the registry manages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub partition_key: KeyAttribute,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<KeyAttribute>,
    #[serde(default)]
    pub throughput: Throughput,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub local_indexes: Vec<LocalIndex>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_indexes: Vec<GlobalIndex>,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAttribute {
    pub name: String,
    #[serde(rename = "type", default)]
    pub attribute_type: AttributeType,
}

/// DynamoDB scalar attribute types usable in keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    #[default]
    String,
    Number,
    Binary,
}

/// Provisioned read/write capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub read: i64,
    pub write: i64,
}

impl Default for Capacity {
    fn default() -> Self {
        Self { read: 5, write: 5 }
    }
}

/// Billing mode for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Throughput {
    Provisioned(Capacity),
    OnDemand,
}

impl Default for Throughput {
    fn default() -> Self {
        Self::Provisioned(Capacity::default())
    }
}

/// Index projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    #[default]
    All,
    KeysOnly,
    Include(Vec<String>),
}

/// Local Secondary Index: same partition key as the table, alternate sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalIndex {
    pub name: String,
    pub sort_key: KeyAttribute,
    #[serde(default)]
    pub projection: Projection,
}

/// Global Secondary Index configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalIndex {
    pub name: String,
    pub partition_key: KeyAttribute,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<KeyAttribute>,
    #[serde(default)]
    pub projection: Projection,
    /// Ignored for on-demand tables. Defaults to the table's capacity otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<Capacity>,
}

impl KeyAttribute {
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::Number)
    }

    pub fn binary(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::Binary)
    }
}

impl LocalIndex {
    pub fn new(name: impl Into<String>, sort_key: KeyAttribute) -> Self {
        Self {
            name: name.into(),
            sort_key,
            projection: Projection::All,
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}

impl GlobalIndex {
    pub fn new(name: impl Into<String>, partition_key: KeyAttribute) -> Self {
        Self {
            name: name.into(),
            partition_key,
            sort_key: None,
            projection: Projection::All,
            throughput: None,
        }
    }

    pub fn with_sort_key(mut self, sort_key: KeyAttribute) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_throughput(mut self, capacity: Capacity) -> Self {
        self.throughput = Some(capacity);
        self
    }
}

impl TableDescriptor {
    /// A table with only a partition key and the default provisioned throughput.
    pub fn new(name: impl Into<String>, partition_key: KeyAttribute) -> Self {
        Self {
            name: name.into(),
            partition_key,
            sort_key: None,
            throughput: Throughput::default(),
            local_indexes: Vec::new(),
            global_indexes: Vec::new(),
        }
    }

    pub fn with_sort_key(mut self, sort_key: KeyAttribute) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    pub fn with_throughput(mut self, throughput: Throughput) -> Self {
        self.throughput = throughput;
        self
    }

    pub fn with_local_index(mut self, index: LocalIndex) -> Self {
        self.local_indexes.push(index);
        self
    }

    pub fn with_global_index(mut self, index: GlobalIndex) -> Self {
        self.global_indexes.push(index);
        self
    }

    /// Every attribute used by the table key or an index key, each name listed once.
    ///
    /// `CreateTable` rejects duplicate attribute definitions, so indexes sharing an
    /// attribute with the table (or with each other) only contribute it once.
    pub fn key_attributes(&self) -> Vec<&KeyAttribute> {
        let mut attributes: Vec<&KeyAttribute> = Vec::new();
        for attr in self.all_key_attributes() {
            if !attributes.iter().any(|a| a.name == attr.name) {
                attributes.push(attr);
            }
        }
        attributes
    }

    /// First key attribute declared with two different types across the table key
    /// and its indexes, if any.
    pub fn conflicting_key_attribute(&self) -> Option<&str> {
        let mut seen: Vec<&KeyAttribute> = Vec::new();
        for attr in self.all_key_attributes() {
            match seen.iter().find(|a| a.name == attr.name) {
                Some(prev) if prev.attribute_type != attr.attribute_type => {
                    return Some(&attr.name);
                }
                Some(_) => {}
                None => seen.push(attr),
            }
        }
        None
    }

    fn all_key_attributes(&self) -> impl Iterator<Item = &KeyAttribute> {
        std::iter::once(&self.partition_key)
            .chain(self.sort_key.as_ref())
            .chain(self.local_indexes.iter().map(|lsi| &lsi.sort_key))
            .chain(self.global_indexes.iter().flat_map(|gsi| {
                std::iter::once(&gsi.partition_key).chain(gsi.sort_key.as_ref())
            }))
    }

    /// Parses a JSON array of descriptors.
    pub fn list_from_json(json: &str) -> serde_json::Result<Vec<Self>> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_attributes_deduplicated() {
        let table = TableDescriptor::new("events", KeyAttribute::string("PK"))
            .with_sort_key(KeyAttribute::string("SK"))
            .with_local_index(LocalIndex::new("by_created", KeyAttribute::number("created")))
            .with_global_index(
                GlobalIndex::new("GSI1", KeyAttribute::string("GSI1PK"))
                    .with_sort_key(KeyAttribute::string("SK")),
            )
            .with_global_index(GlobalIndex::new("GSI2", KeyAttribute::string("GSI1PK")));

        let names: Vec<&str> = table
            .key_attributes()
            .iter()
            .map(|a| a.name.as_str())
            .collect();

        assert_eq!(names, vec!["PK", "SK", "created", "GSI1PK"]);
    }

    #[test]
    fn test_conflicting_key_attribute() {
        let consistent = TableDescriptor::new("events", KeyAttribute::string("PK"))
            .with_sort_key(KeyAttribute::number("at"))
            .with_global_index(GlobalIndex::new("by_at", KeyAttribute::number("at")));
        assert_eq!(consistent.conflicting_key_attribute(), None);

        let conflicting = TableDescriptor::new("events", KeyAttribute::string("PK"))
            .with_sort_key(KeyAttribute::string("at"))
            .with_local_index(LocalIndex::new("by_kind", KeyAttribute::string("kind")))
            .with_global_index(
                GlobalIndex::new("by_owner", KeyAttribute::string("owner"))
                    .with_sort_key(KeyAttribute::binary("kind")),
            );
        assert_eq!(conflicting.conflicting_key_attribute(), Some("kind"));
    }

    #[test]
    fn test_defaults() {
        let table = TableDescriptor::new("users", KeyAttribute::string("id"));
        assert_eq!(table.throughput, Throughput::Provisioned(Capacity { read: 5, write: 5 }));
        assert!(table.sort_key.is_none());
        assert!(table.local_indexes.is_empty());
        assert!(table.global_indexes.is_empty());
    }

    #[test]
    fn test_list_from_json() {
        let json = r#"[
            {
                "name": "users",
                "partition_key": { "name": "id" }
            },
            {
                "name": "events",
                "partition_key": { "name": "PK", "type": "string" },
                "sort_key": { "name": "at", "type": "number" },
                "throughput": { "mode": "on_demand" },
                "global_indexes": [
                    {
                        "name": "by_owner",
                        "partition_key": { "name": "owner" },
                        "projection": { "include": ["title"] }
                    }
                ]
            },
            {
                "name": "logs",
                "partition_key": { "name": "id", "type": "binary" },
                "throughput": { "mode": "provisioned", "read": 10, "write": 2 },
                "local_indexes": [
                    { "name": "by_level", "sort_key": { "name": "level" }, "projection": "keys_only" }
                ]
            }
        ]"#;

        let tables = TableDescriptor::list_from_json(json).unwrap();

        assert_eq!(tables[0], TableDescriptor::new("users", KeyAttribute::string("id")));

        assert_eq!(tables[1].throughput, Throughput::OnDemand);
        assert_eq!(tables[1].sort_key, Some(KeyAttribute::number("at")));
        assert_eq!(
            tables[1].global_indexes[0].projection,
            Projection::Include(vec!["title".to_string()])
        );

        assert_eq!(
            tables[2].throughput,
            Throughput::Provisioned(Capacity { read: 10, write: 2 })
        );
        assert_eq!(tables[2].partition_key.attribute_type, AttributeType::Binary);
        assert_eq!(tables[2].local_indexes[0].projection, Projection::KeysOnly);
    }

    #[test]
    fn test_list_from_json_rejects_missing_partition_key() {
        assert!(TableDescriptor::list_from_json(r#"[{ "name": "users" }]"#).is_err());
    }
}
