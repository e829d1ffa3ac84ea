use crate::{CountRequest, DeleteByQueryRequest, ElasticWriter, IndexRequest, SearchRequest};
use serde_json::{Map, Value as Json};
use std::time::Duration;
use vessel_core::{
    Backend, Condition, ConditionTranslator, DeleteQuery, Entity, Field, Result, SelectQuery,
    TranslationError, truncate_long, write_document, write_field,
};

/// Key field used when the entity does not name one.
pub const DEFAULT_KEY: &str = "_id";

/// Translates entities and queries into Elasticsearch requests, the index is the entity name.
#[derive(Default, Debug, Clone)]
pub struct ElasticsearchBackend {
    writer: ElasticWriter,
}

impl ElasticsearchBackend {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn writer(&self) -> &ElasticWriter {
        &self.writer
    }

    pub fn count(&self, index: &str) -> CountRequest {
        let request = CountRequest {
            index: index.into(),
        };
        log::debug!("{}", request);
        request
    }

    pub fn serialize(&self, entity: &Entity) -> Map<String, Json> {
        write_document(entity.fields())
    }

    /// Text of a key usable in a document path.
    fn document_id(field: &Field) -> String {
        match write_field(field) {
            Json::String(v) => v,
            v => v.to_string(),
        }
    }
}

impl Backend for ElasticsearchBackend {
    type Clause = Json;
    type Insert = IndexRequest;
    type Update = IndexRequest;
    type Select = SearchRequest;
    type Delete = DeleteByQueryRequest;

    const NAME: &'static str = "elasticsearch";

    fn translate_condition(&self, condition: Option<&Condition>) -> Result<Json> {
        self.writer.translate(condition)
    }

    fn build_insert_payload(
        &self,
        entity: &Entity,
        ttl: Option<Duration>,
    ) -> Result<IndexRequest> {
        if ttl.is_some() {
            return TranslationError::unsupported(Self::NAME, "inserting with a time to live")
                .raise();
        }
        let key = entity.key().unwrap_or(DEFAULT_KEY);
        let id = entity.find(key).map(Self::document_id);
        let document = match id {
            Some(..) => self.serialize(&entity.without(key)),
            None => self.serialize(entity),
        };
        let request = IndexRequest {
            index: entity.name().into(),
            id,
            document,
        };
        let text = request.to_string();
        log::debug!("{}", truncate_long!(text));
        Ok(request)
    }

    fn build_update_payload(&self, entity: &Entity) -> Result<IndexRequest> {
        let key = entity.key().unwrap_or(DEFAULT_KEY);
        let Some(key_field) = entity.find(key) else {
            return TranslationError::MissingKey {
                collection: entity.name().into(),
                key: key.into(),
            }
            .raise();
        };
        let request = IndexRequest {
            index: entity.name().into(),
            id: Some(Self::document_id(key_field)),
            document: self.serialize(&entity.without(key)),
        };
        let text = request.to_string();
        log::debug!("{}", truncate_long!(text));
        Ok(request)
    }

    fn build_select_query(&self, query: &SelectQuery) -> Result<SearchRequest> {
        let request = SearchRequest {
            index: query.collection.clone(),
            query: self.translate_condition(query.condition.as_ref())?,
            sort: self.writer.map_sorts(&query.sorts),
            source: self.writer.map_projection(&query.fields),
            from: (query.skip > 0).then_some(query.skip),
            size: (query.limit > 0).then_some(query.limit),
        };
        let text = request.to_string();
        log::debug!("{}", truncate_long!(text));
        Ok(request)
    }

    fn build_delete_query(&self, query: &DeleteQuery) -> Result<DeleteByQueryRequest> {
        let request = DeleteByQueryRequest {
            index: query.collection.clone(),
            query: self.translate_condition(query.condition.as_ref())?,
        };
        let text = request.to_string();
        log::debug!("{}", truncate_long!(text));
        Ok(request)
    }
}
