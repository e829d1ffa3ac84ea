use serde_json::{Map, Value as Json, json};
use std::fmt::{self, Display, Formatter};

macro_rules! impl_display {
    ($command:ty) => {
        impl Display for $command {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_command())
            }
        }
    };
}

/// `find` database command.
#[derive(Debug, Clone, PartialEq)]
pub struct FindCommand {
    pub collection: String,
    pub filter: Json,
    pub projection: Option<Json>,
    pub sort: Option<Json>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl FindCommand {
    pub fn to_command(&self) -> Json {
        let mut command = Map::new();
        command.insert("find".into(), Json::String(self.collection.clone()));
        command.insert("filter".into(), self.filter.clone());
        if let Some(projection) = &self.projection {
            command.insert("projection".into(), projection.clone());
        }
        if let Some(sort) = &self.sort {
            command.insert("sort".into(), sort.clone());
        }
        if let Some(skip) = self.skip {
            command.insert("skip".into(), skip.into());
        }
        if let Some(limit) = self.limit {
            command.insert("limit".into(), limit.into());
        }
        Json::Object(command)
    }
}

/// `insert` of a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertCommand {
    pub collection: String,
    pub document: Map<String, Json>,
}

impl InsertCommand {
    pub fn to_command(&self) -> Json {
        json!({
            "insert": self.collection,
            "documents": [self.document],
        })
    }
}

/// `findAndModify` replacing the document matched by its key.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceCommand {
    pub collection: String,
    pub filter: Json,
    /// The new document, without the key.
    pub replacement: Map<String, Json>,
}

impl ReplaceCommand {
    pub fn to_command(&self) -> Json {
        json!({
            "findAndModify": self.collection,
            "query": self.filter,
            "update": self.replacement,
        })
    }
}

/// `delete` of every matching document.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCommand {
    pub collection: String,
    pub filter: Json,
}

impl DeleteCommand {
    pub fn to_command(&self) -> Json {
        json!({
            "delete": self.collection,
            "deletes": [{ "q": self.filter, "limit": 0 }],
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountCommand {
    pub collection: String,
}

impl CountCommand {
    pub fn to_command(&self) -> Json {
        json!({ "count": self.collection })
    }
}

/// `aggregate` with a caller supplied pipeline, results returned through a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateCommand {
    pub collection: String,
    pub pipeline: Vec<Json>,
}

impl AggregateCommand {
    pub fn to_command(&self) -> Json {
        json!({
            "aggregate": self.collection,
            "pipeline": self.pipeline,
            "cursor": {},
        })
    }
}

impl_display!(FindCommand);
impl_display!(InsertCommand);
impl_display!(ReplaceCommand);
impl_display!(DeleteCommand);
impl_display!(CountCommand);
impl_display!(AggregateCommand);
