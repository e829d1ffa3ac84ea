use crate::{Condition, Sort};

/// Backend-neutral read request.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub collection: String,
    pub condition: Option<Condition>,
    /// Applied in order.
    pub sorts: Vec<Sort>,
    /// Projected field names, empty means every field.
    pub fields: Vec<String>,
    /// Number of leading results to skip.
    pub skip: u64,
    /// Maximum number of results, zero means unbounded.
    pub limit: u64,
}

impl SelectQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Default::default()
        }
    }
    pub fn filter(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }
    pub fn fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }
}

/// Backend-neutral delete request.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    pub collection: String,
    /// No condition deletes everything.
    pub condition: Option<Condition>,
}

impl DeleteQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            condition: None,
        }
    }
    pub fn filter(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}
