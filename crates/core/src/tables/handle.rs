use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::TableDescriptor;

/// Prefix of the conventional per-table attribute names (`table_<name>`).
pub const TABLE_ATTRIBUTE_PREFIX: &str = "table_";

/// A declared table bound to a scope's connection.
pub struct TableHandle<C> {
    descriptor: Arc<TableDescriptor>,
    connection: Arc<C>,
}

impl<C> TableHandle<C> {
    pub fn new(descriptor: Arc<TableDescriptor>, connection: Arc<C>) -> Self {
        Self {
            descriptor,
            connection,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &TableDescriptor {
        &self.descriptor
    }

    /// The connection this handle is bound to.
    pub fn connection(&self) -> &Arc<C> {
        &self.connection
    }

    /// Conventional attribute name for this table, e.g. `table_users`.
    pub fn attribute_name(&self) -> String {
        format!("{TABLE_ATTRIBUTE_PREFIX}{}", self.name())
    }
}

impl<C> Clone for TableHandle<C> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Arc::clone(&self.descriptor),
            connection: Arc::clone(&self.connection),
        }
    }
}

impl<C> fmt::Debug for TableHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableHandle")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Table handles keyed by table name, iterated in declaration order.
pub struct TableMap<C> {
    handles: Vec<TableHandle<C>>,
    index: HashMap<String, usize>,
}

impl<C> TableMap<C> {
    /// Binds every descriptor to `connection`.
    pub fn bind(descriptors: &[Arc<TableDescriptor>], connection: Arc<C>) -> Self {
        let handles: Vec<TableHandle<C>> = descriptors
            .iter()
            .map(|d| TableHandle::new(Arc::clone(d), Arc::clone(&connection)))
            .collect();
        let index = handles
            .iter()
            .enumerate()
            .map(|(i, h)| (h.name().to_string(), i))
            .collect();

        Self { handles, index }
    }

    pub fn get(&self, name: &str) -> Option<&TableHandle<C>> {
        self.index.get(name).map(|&i| &self.handles[i])
    }

    /// Looks a table up by its conventional attribute name (`table_<name>`).
    pub fn get_attribute(&self, attribute: &str) -> Option<&TableHandle<C>> {
        attribute
            .strip_prefix(TABLE_ATTRIBUTE_PREFIX)
            .and_then(|name| self.get(name))
    }

    /// Conventional attribute names of every table, in declaration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = String> + '_ {
        self.handles.iter().map(TableHandle::attribute_name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handles.iter().map(TableHandle::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableHandle<C>> {
        self.handles.iter()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<C> fmt::Debug for TableMap<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::KeyAttribute;

    fn descriptors(names: &[&str]) -> Vec<Arc<TableDescriptor>> {
        names
            .iter()
            .map(|n| Arc::new(TableDescriptor::new(*n, KeyAttribute::string("id"))))
            .collect()
    }

    #[test]
    fn test_bind_shares_connection() {
        let connection = Arc::new("conn".to_string());
        let map = TableMap::bind(&descriptors(&["users", "groups"]), Arc::clone(&connection));

        assert_eq!(map.len(), 2);
        assert!(!map.is_empty());
        for handle in map.iter() {
            assert!(Arc::ptr_eq(handle.connection(), &connection));
        }
    }

    #[test]
    fn test_bind_without_descriptors() {
        let map = TableMap::bind(&[], Arc::new(()));

        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert!(map.get("users").is_none());
    }

    #[test]
    fn test_lookup_by_name_and_attribute() {
        let map = TableMap::bind(&descriptors(&["users", "groups"]), Arc::new(()));

        assert_eq!(map.get("users").map(TableHandle::name), Some("users"));
        assert_eq!(
            map.get_attribute("table_groups").map(TableHandle::name),
            Some("groups")
        );
        assert!(map.get("table_users").is_none());
        assert!(map.get_attribute("users").is_none());
        assert!(map.get("missing").is_none());
    }

    #[test]
    fn test_declaration_order_preserved() {
        let map = TableMap::bind(&descriptors(&["zeta", "alpha", "mid"]), Arc::new(()));

        assert_eq!(map.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            map.attribute_names().collect::<Vec<_>>(),
            vec!["table_zeta", "table_alpha", "table_mid"]
        );
    }
}
