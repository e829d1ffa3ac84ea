use crate::{
    AggregateCommand, CountCommand, DeleteCommand, FindCommand, InsertCommand, MongoConfig,
    MongoWriter, ReplaceCommand,
};
use serde_json::{Map, Value as Json};
use std::time::Duration;
use vessel_core::{
    Backend, Condition, ConditionTranslator, DeleteQuery, Entity, Result, SelectQuery,
    TranslationError, truncate_long, write_document, write_field,
};

/// Key field used when the entity does not name one.
pub const DEFAULT_KEY: &str = "_id";

/// Translates entities and queries into MongoDB database commands.
#[derive(Debug, Clone)]
pub struct MongoBackend {
    database: String,
    writer: MongoWriter,
}

impl MongoBackend {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            writer: MongoWriter,
        }
    }

    pub fn from_config(config: &MongoConfig) -> Self {
        Self::new(config.database.clone())
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn writer(&self) -> &MongoWriter {
        &self.writer
    }

    /// Number of documents of `collection`.
    pub fn count(&self, collection: &str) -> CountCommand {
        let command = CountCommand {
            collection: collection.into(),
        };
        log::debug!("{}", command);
        command
    }

    /// Document of `entity`, structured fields become sub documents.
    ///
    /// Top level names go through the same checks as the filter field names.
    pub fn serialize(&self, entity: &Entity) -> Result<Map<String, Json>> {
        for field in entity.fields() {
            self.writer.identifier(&field.name)?;
        }
        Ok(write_document(entity.fields()))
    }

    /// `aggregate` running `pipeline` as given.
    pub fn aggregate(&self, collection: &str, pipeline: Vec<Json>) -> AggregateCommand {
        let command = AggregateCommand {
            collection: collection.into(),
            pipeline,
        };
        let text = command.to_string();
        log::debug!("{}", truncate_long!(text));
        command
    }
}

impl Backend for MongoBackend {
    type Clause = Json;
    type Insert = InsertCommand;
    type Update = ReplaceCommand;
    type Select = FindCommand;
    type Delete = DeleteCommand;

    const NAME: &'static str = "mongodb";

    fn translate_condition(&self, condition: Option<&Condition>) -> Result<Json> {
        self.writer.translate(condition)
    }

    fn build_insert_payload(
        &self,
        entity: &Entity,
        ttl: Option<Duration>,
    ) -> Result<InsertCommand> {
        if ttl.is_some() {
            return TranslationError::unsupported(Self::NAME, "inserting with a time to live")
                .raise();
        }
        let command = InsertCommand {
            collection: entity.name().into(),
            document: self.serialize(entity)?,
        };
        let text = command.to_string();
        log::debug!("{}", truncate_long!(text));
        Ok(command)
    }

    fn build_update_payload(&self, entity: &Entity) -> Result<ReplaceCommand> {
        let key = entity.key().unwrap_or(DEFAULT_KEY);
        let Some(key_field) = entity.find(key) else {
            return TranslationError::MissingKey {
                collection: entity.name().into(),
                key: key.into(),
            }
            .raise();
        };
        let mut filter = Map::new();
        filter.insert(self.writer.identifier(key)?.into_owned(), write_field(key_field));
        let command = ReplaceCommand {
            collection: entity.name().into(),
            filter: Json::Object(filter),
            replacement: self.serialize(&entity.without(key))?,
        };
        let text = command.to_string();
        log::debug!("{}", truncate_long!(text));
        Ok(command)
    }

    fn build_select_query(&self, query: &SelectQuery) -> Result<FindCommand> {
        let command = FindCommand {
            collection: query.collection.clone(),
            filter: self.translate_condition(query.condition.as_ref())?,
            projection: self.writer.map_projection(&query.fields)?,
            sort: self.writer.map_sorts(&query.sorts)?,
            skip: (query.skip > 0).then_some(query.skip),
            limit: (query.limit > 0).then_some(query.limit),
        };
        let text = command.to_string();
        log::debug!("{}", truncate_long!(text));
        Ok(command)
    }

    fn build_delete_query(&self, query: &DeleteQuery) -> Result<DeleteCommand> {
        let command = DeleteCommand {
            collection: query.collection.clone(),
            filter: self.translate_condition(query.condition.as_ref())?,
        };
        let text = command.to_string();
        log::debug!("{}", truncate_long!(text));
        Ok(command)
    }
}
