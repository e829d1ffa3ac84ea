use crate::{Condition, DeleteQuery, Entity, Result, SelectQuery};
use std::time::Duration;

/// A native dialect: everything the CRUD layer needs to talk to a store's own client.
pub trait Backend {
    type Clause;
    type Insert;
    type Update;
    type Select;
    type Delete;

    const NAME: &'static str;

    /// Native filter for `condition`, `None` matches every record.
    fn translate_condition(&self, condition: Option<&Condition>) -> Result<Self::Clause>;

    /// Insert payload for `entity`, expiring after `ttl` when present.
    fn build_insert_payload(&self, entity: &Entity, ttl: Option<Duration>) -> Result<Self::Insert>;

    /// Replacement payload matched by the entity key.
    fn build_update_payload(&self, entity: &Entity) -> Result<Self::Update>;

    fn build_select_query(&self, query: &SelectQuery) -> Result<Self::Select>;

    fn build_delete_query(&self, query: &DeleteQuery) -> Result<Self::Delete>;
}

/// Whole seconds of a time to live, truncating any fraction.
pub const fn ttl_seconds(ttl: &Duration) -> u64 {
    ttl.as_secs()
}
