use crate::{
    CassandraConfig, CqlClause, CqlCount, CqlDelete, CqlInsert, CqlRegistry, CqlSelect, CqlTerm,
    CqlUpdate, CqlWriter, SchemaCatalog, resolve_structured,
};
use std::time::Duration;
use vessel_core::{
    Backend, Condition, ConditionTranslator, DeleteQuery, Encoder, Entity, Error, Field,
    FieldKind, Result, SelectQuery, TranslationError, coerce, truncate_long, ttl_seconds,
};

/// Key column used when the entity does not name one.
pub const DEFAULT_KEY: &str = "id";

/// Translates entities and queries into CQL statements for the tables of one keyspace.
#[derive(Debug, Clone)]
pub struct CassandraBackend<C> {
    keyspace: String,
    catalog: C,
    writer: CqlWriter,
}

impl<C: SchemaCatalog> CassandraBackend<C> {
    pub fn new(keyspace: impl Into<String>, catalog: C) -> Self {
        Self {
            keyspace: keyspace.into(),
            catalog,
            writer: CqlWriter,
        }
    }

    pub fn from_config(config: &CassandraConfig, catalog: C) -> Self {
        Self::new(config.keyspace.clone(), catalog)
    }

    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn writer(&self) -> &CqlWriter {
        &self.writer
    }

    /// Number of rows of `table`.
    pub fn count(&self, table: &str) -> CqlCount {
        let statement = CqlCount {
            keyspace: self.keyspace.clone(),
            table: table.into(),
        };
        log::debug!("{}", statement);
        statement
    }

    /// Column values of `entity`, in field order.
    ///
    /// Scalars use the declared column type when the schema knows the column, structured
    /// fields are resolved against the schema.
    pub fn serialize(&self, entity: &Entity) -> Result<Vec<(String, CqlTerm)>> {
        entity
            .fields()
            .iter()
            .map(|field| {
                self.term(entity.name(), field)
                    .map(|term| (field.name.clone(), term))
            })
            .collect()
    }

    fn term(&self, table: &str, field: &Field) -> Result<CqlTerm> {
        Ok(match &field.kind {
            FieldKind::Scalar(value) => {
                let column = self
                    .catalog
                    .keyspace(&self.keyspace)
                    .and_then(|v| v.table(table))
                    .and_then(|v| v.column(&field.name));
                let literal = match column {
                    Some(column) => column.data_type.encode(value),
                    None => coerce(&CqlRegistry, value),
                };
                literal.into()
            }
            FieldKind::Structured(structured) => resolve_structured(
                &self.catalog,
                &self.keyspace,
                table,
                &field.name,
                structured,
            )?
            .into(),
        })
    }

    fn ensure_not_empty(&self, entity: &Entity) -> Result<()> {
        if entity.is_empty() {
            let error = Error::msg(format!(
                "The entity `{}` has no field to write",
                entity.name()
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(())
    }
}

impl<C: SchemaCatalog> Backend for CassandraBackend<C> {
    type Clause = CqlClause;
    type Insert = CqlInsert;
    type Update = CqlUpdate;
    type Select = CqlSelect;
    type Delete = CqlDelete;

    const NAME: &'static str = "cassandra";

    fn translate_condition(&self, condition: Option<&Condition>) -> Result<CqlClause> {
        self.writer.translate(condition)
    }

    fn build_insert_payload(&self, entity: &Entity, ttl: Option<Duration>) -> Result<CqlInsert> {
        self.ensure_not_empty(entity)?;
        let statement = CqlInsert {
            keyspace: self.keyspace.clone(),
            table: entity.name().into(),
            values: self.serialize(entity)?,
            ttl: ttl.as_ref().map(ttl_seconds),
        };
        let cql = statement.to_string();
        log::debug!("{}", truncate_long!(cql));
        Ok(statement)
    }

    fn build_update_payload(&self, entity: &Entity) -> Result<CqlUpdate> {
        let key = entity.key().unwrap_or(DEFAULT_KEY);
        let Some(key_field) = entity.find(key) else {
            return TranslationError::MissingKey {
                collection: entity.name().into(),
                key: key.into(),
            }
            .raise();
        };
        let assignments = entity.without(key);
        self.ensure_not_empty(&assignments)?;
        let key_term = self.term(entity.name(), key_field)?;
        let statement = CqlUpdate {
            keyspace: self.keyspace.clone(),
            table: entity.name().into(),
            assignments: self.serialize(&assignments)?,
            key: (key.into(), key_term),
        };
        let cql = statement.to_string();
        log::debug!("{}", truncate_long!(cql));
        Ok(statement)
    }

    fn build_select_query(&self, query: &SelectQuery) -> Result<CqlSelect> {
        if query.skip > 0 {
            return TranslationError::unsupported(Self::NAME, "skipping rows (OFFSET)").raise();
        }
        let statement = CqlSelect {
            keyspace: self.keyspace.clone(),
            table: query.collection.clone(),
            columns: self.writer.map_projection(&query.fields),
            clause: self.translate_condition(query.condition.as_ref())?,
            order_by: self.writer.map_sorts(&query.sorts),
            limit: (query.limit > 0).then_some(query.limit),
        };
        let cql = statement.to_string();
        log::debug!("{}", truncate_long!(cql));
        Ok(statement)
    }

    fn build_delete_query(&self, query: &DeleteQuery) -> Result<CqlDelete> {
        let statement = CqlDelete {
            keyspace: self.keyspace.clone(),
            table: query.collection.clone(),
            clause: self.translate_condition(query.condition.as_ref())?,
        };
        let cql = statement.to_string();
        log::debug!("{}", truncate_long!(cql));
        Ok(statement)
    }
}
