use crate::CqlType;
use std::{collections::BTreeMap, sync::Arc};

/// Live schema metadata of a cluster.
///
/// Implemented by whatever owns the session, it is read on every structured value resolution.
pub trait SchemaCatalog {
    fn keyspace(&self, name: &str) -> Option<&KeyspaceMetadata>;
}

impl<C: SchemaCatalog + ?Sized> SchemaCatalog for &C {
    fn keyspace(&self, name: &str) -> Option<&KeyspaceMetadata> {
        (**self).keyspace(name)
    }
}

impl<C: SchemaCatalog + ?Sized> SchemaCatalog for Arc<C> {
    fn keyspace(&self, name: &str) -> Option<&KeyspaceMetadata> {
        (**self).keyspace(name)
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct KeyspaceMetadata {
    pub name: String,
    pub tables: BTreeMap<String, TableMetadata>,
    pub user_types: BTreeMap<String, UserDefinedType>,
}

impl KeyspaceMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    pub fn with_table(mut self, table: TableMetadata) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }
    pub fn with_user_type(mut self, user_type: UserDefinedType) -> Self {
        self.user_types.insert(user_type.name.clone(), user_type);
        self
    }
    pub fn table(&self, name: &str) -> Option<&TableMetadata> {
        self.tables.get(name)
    }
    pub fn user_type(&self, name: &str) -> Option<&UserDefinedType> {
        self.user_types.get(name)
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct TableMetadata {
    pub name: String,
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }
    pub fn with_column(mut self, name: impl Into<String>, data_type: CqlType) -> Self {
        self.columns.push(ColumnMetadata {
            name: name.into(),
            data_type,
        });
        self
    }
    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: CqlType,
}

/// Declared structure of a user defined type.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct UserDefinedType {
    pub keyspace: String,
    pub name: String,
    pub field_names: Vec<String>,
    pub field_types: Vec<CqlType>,
}

impl UserDefinedType {
    pub fn new(keyspace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            keyspace: keyspace.into(),
            name: name.into(),
            ..Default::default()
        }
    }
    pub fn with_field(mut self, name: impl Into<String>, data_type: CqlType) -> Self {
        self.field_names.push(name.into());
        self.field_types.push(data_type);
        self
    }
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.field_names.iter().position(|v| v == name)
    }
}

/// Catalog held in memory, loaded by the caller.
#[derive(Default, Debug, Clone)]
pub struct MemoryCatalog {
    keyspaces: BTreeMap<String, KeyspaceMetadata>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn with_keyspace(mut self, keyspace: KeyspaceMetadata) -> Self {
        self.insert(keyspace);
        self
    }
    /// Add or replace a keyspace.
    pub fn insert(&mut self, keyspace: KeyspaceMetadata) {
        self.keyspaces.insert(keyspace.name.clone(), keyspace);
    }
}

impl SchemaCatalog for MemoryCatalog {
    fn keyspace(&self, name: &str) -> Option<&KeyspaceMetadata> {
        self.keyspaces.get(name)
    }
}
