use serde_json::{Map, Value as Json, json};
use std::fmt::{self, Display, Formatter};
use urlencoding::encode;

macro_rules! impl_display {
    ($request:ty) => {
        impl Display for $request {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}\n{}", self.method(), self.path(), self.body())
            }
        }
    };
}

/// `_search` request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub index: String,
    pub query: Json,
    pub sort: Option<Json>,
    /// `_source` filter.
    pub source: Option<Json>,
    pub from: Option<u64>,
    pub size: Option<u64>,
}

impl SearchRequest {
    pub fn method(&self) -> &'static str {
        "POST"
    }
    pub fn path(&self) -> String {
        format!("/{}/_search", encode(&self.index))
    }
    pub fn body(&self) -> Json {
        let mut body = Map::new();
        body.insert("query".into(), self.query.clone());
        if let Some(sort) = &self.sort {
            body.insert("sort".into(), sort.clone());
        }
        if let Some(source) = &self.source {
            body.insert("_source".into(), source.clone());
        }
        if let Some(from) = self.from {
            body.insert("from".into(), from.into());
        }
        if let Some(size) = self.size {
            body.insert("size".into(), size.into());
        }
        Json::Object(body)
    }
}

/// Stores a document, replacing the one with the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRequest {
    pub index: String,
    /// Generated by the cluster when missing, percent encoded in the path.
    pub id: Option<String>,
    pub document: Map<String, Json>,
}

impl IndexRequest {
    pub fn method(&self) -> &'static str {
        if self.id.is_some() { "PUT" } else { "POST" }
    }
    pub fn path(&self) -> String {
        match &self.id {
            Some(id) => format!("/{}/_doc/{}", encode(&self.index), encode(id)),
            None => format!("/{}/_doc", encode(&self.index)),
        }
    }
    pub fn body(&self) -> Json {
        Json::Object(self.document.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteByQueryRequest {
    pub index: String,
    pub query: Json,
}

impl DeleteByQueryRequest {
    pub fn method(&self) -> &'static str {
        "POST"
    }
    pub fn path(&self) -> String {
        format!("/{}/_delete_by_query", encode(&self.index))
    }
    pub fn body(&self) -> Json {
        json!({ "query": self.query })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountRequest {
    pub index: String,
}

impl CountRequest {
    pub fn method(&self) -> &'static str {
        "GET"
    }
    pub fn path(&self) -> String {
        format!("/{}/_count", encode(&self.index))
    }
    pub fn body(&self) -> Json {
        json!({ "query": { "match_all": {} } })
    }
}

impl_display!(SearchRequest);
impl_display!(IndexRequest);
impl_display!(DeleteByQueryRequest);
impl_display!(CountRequest);
