use crate::{CqlClause, CqlLiteral, StructuredValue, quote_identifier, writer::write_table_ref};
use std::fmt::{self, Display, Formatter};
use vessel_core::separated_by;

/// Right hand side of an assignment or of an inserted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CqlTerm {
    Literal(CqlLiteral),
    Structured(StructuredValue),
}

impl Display for CqlTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CqlTerm::Literal(v) => v.fmt(f),
            CqlTerm::Structured(v) => v.fmt(f),
        }
    }
}

impl From<CqlLiteral> for CqlTerm {
    fn from(value: CqlLiteral) -> Self {
        CqlTerm::Literal(value)
    }
}

impl From<StructuredValue> for CqlTerm {
    fn from(value: StructuredValue) -> Self {
        CqlTerm::Structured(value)
    }
}

fn write_assignments(out: &mut String, values: &[(String, CqlTerm)]) {
    separated_by(
        out,
        values,
        |out, (name, value)| {
            out.push_str(&quote_identifier(name));
            out.push_str(" = ");
            out.push_str(&value.to_string());
        },
        ", ",
    );
}

fn write_where(out: &mut String, clause: &CqlClause) {
    if !clause.is_empty() {
        out.push_str("\nWHERE ");
        out.push_str(&clause.to_string());
    }
}

/// `INSERT INTO`, optionally expiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CqlInsert {
    pub keyspace: String,
    pub table: String,
    /// Column name and value, in entity order.
    pub values: Vec<(String, CqlTerm)>,
    /// Whole seconds.
    pub ttl: Option<u64>,
}

impl CqlInsert {
    pub fn value(&self, column: &str) -> Option<&CqlTerm> {
        self.values.iter().find(|(k, _)| k == column).map(|(_, v)| v)
    }
}

impl Display for CqlInsert {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(64 + self.values.len() * 32);
        out.push_str("INSERT INTO ");
        write_table_ref(&mut out, &self.keyspace, &self.table);
        out.push_str(" (");
        separated_by(
            &mut out,
            &self.values,
            |out, (name, _)| out.push_str(&quote_identifier(name)),
            ", ",
        );
        out.push_str(")\nVALUES (");
        separated_by(
            &mut out,
            &self.values,
            |out, (_, value)| out.push_str(&value.to_string()),
            ", ",
        );
        out.push(')');
        if let Some(ttl) = self.ttl {
            out.push_str("\nUSING TTL ");
            out.push_str(itoa::Buffer::new().format(ttl));
        }
        out.push(';');
        f.write_str(&out)
    }
}

/// `UPDATE` of the row matched by its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CqlUpdate {
    pub keyspace: String,
    pub table: String,
    pub assignments: Vec<(String, CqlTerm)>,
    pub key: (String, CqlTerm),
}

impl Display for CqlUpdate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(64 + self.assignments.len() * 32);
        out.push_str("UPDATE ");
        write_table_ref(&mut out, &self.keyspace, &self.table);
        out.push_str("\nSET ");
        write_assignments(&mut out, &self.assignments);
        out.push_str("\nWHERE ");
        write_assignments(&mut out, std::slice::from_ref(&self.key));
        out.push(';');
        f.write_str(&out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CqlSelect {
    pub keyspace: String,
    pub table: String,
    /// Selected columns, `*` for all of them.
    pub columns: Vec<String>,
    pub clause: CqlClause,
    pub order_by: Vec<String>,
    pub limit: Option<u64>,
}

impl Display for CqlSelect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(128);
        out.push_str("SELECT ");
        separated_by(&mut out, &self.columns, |out, v| out.push_str(v), ", ");
        out.push_str(" FROM ");
        write_table_ref(&mut out, &self.keyspace, &self.table);
        write_where(&mut out, &self.clause);
        if !self.order_by.is_empty() {
            out.push_str("\nORDER BY ");
            separated_by(&mut out, &self.order_by, |out, v| out.push_str(v), ", ");
        }
        if let Some(limit) = self.limit {
            out.push_str("\nLIMIT ");
            out.push_str(itoa::Buffer::new().format(limit));
        }
        out.push(';');
        f.write_str(&out)
    }
}

/// Removal of the matching rows, every row when the clause is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CqlDelete {
    pub keyspace: String,
    pub table: String,
    pub clause: CqlClause,
}

impl CqlDelete {
    pub fn is_truncate(&self) -> bool {
        self.clause.is_empty()
    }
}

impl Display for CqlDelete {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(64);
        out.push_str(if self.is_truncate() {
            "TRUNCATE "
        } else {
            "DELETE FROM "
        });
        write_table_ref(&mut out, &self.keyspace, &self.table);
        write_where(&mut out, &self.clause);
        out.push(';');
        f.write_str(&out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CqlCount {
    pub keyspace: String,
    pub table: String,
}

impl Display for CqlCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::from("SELECT COUNT(*) FROM ");
        write_table_ref(&mut out, &self.keyspace, &self.table);
        out.push(';');
        f.write_str(&out)
    }
}
