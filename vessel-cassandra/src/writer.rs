use crate::{CqlRegistry, codec::CqlLiteral};
use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
};
use vessel_core::{
    ConditionTranslator, Operator, Order, Result, Sort, TranslationError, Value, coerce,
    separated_by,
};

/// Keywords that cannot be used as bare identifiers.
const RESERVED: &[&str] = &[
    "add",
    "allow",
    "alter",
    "and",
    "apply",
    "asc",
    "authorize",
    "batch",
    "begin",
    "by",
    "columnfamily",
    "create",
    "delete",
    "desc",
    "describe",
    "drop",
    "entries",
    "execute",
    "from",
    "full",
    "grant",
    "if",
    "in",
    "index",
    "infinity",
    "insert",
    "into",
    "is",
    "keyspace",
    "limit",
    "materialized",
    "mbean",
    "mbeans",
    "modify",
    "nan",
    "norecursive",
    "not",
    "null",
    "of",
    "on",
    "or",
    "order",
    "primary",
    "rename",
    "replace",
    "revoke",
    "schema",
    "select",
    "set",
    "table",
    "to",
    "token",
    "truncate",
    "unlogged",
    "unset",
    "update",
    "use",
    "using",
    "view",
    "where",
    "with",
];

/// Identifier as it must appear in a statement.
///
/// Plain lower case names stay bare, anything else (including names starting with `_`) is
/// double quoted with inner quotes doubled.
pub fn quote_identifier(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    let bare = chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && RESERVED.binary_search(&name).is_err();
    if bare {
        return Cow::Borrowed(name);
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    out.push_str(&name.replace('"', "\"\""));
    out.push('"');
    Cow::Owned(out)
}

pub(crate) fn write_table_ref(out: &mut String, keyspace: &str, table: &str) {
    out.push_str(&quote_identifier(keyspace));
    out.push('.');
    out.push_str(&quote_identifier(table));
}

/// Relations of a WHERE clause, joined by `AND`. Empty matches every row.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CqlClause(pub Vec<String>);

impl CqlClause {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn relations(&self) -> &[String] {
        &self.0
    }
}

impl Display for CqlClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        separated_by(&mut out, &self.0, |out, v| out.push_str(v), " AND ");
        f.write_str(&out)
    }
}

/// Writes the CQL fragments of conditions, sorts and projections.
#[derive(Default, Debug, Clone, Copy)]
pub struct CqlWriter;

impl CqlWriter {
    pub fn literal(&self, value: &Value) -> CqlLiteral {
        coerce(&CqlRegistry, value)
    }

    /// `ORDER BY` items, in order.
    pub fn map_sorts(&self, sorts: &[Sort]) -> Vec<String> {
        sorts
            .iter()
            .map(|sort| {
                format!(
                    "{} {}",
                    quote_identifier(&sort.name),
                    match sort.order {
                        Order::ASC => "ASC",
                        Order::DESC => "DESC",
                    }
                )
            })
            .collect()
    }

    /// Selected columns, an empty projection selects every column.
    pub fn map_projection(&self, fields: &[String]) -> Vec<String> {
        if fields.is_empty() {
            return vec!["*".into()];
        }
        fields
            .iter()
            .map(|v| quote_identifier(v).into_owned())
            .collect()
    }
}

impl ConditionTranslator for CqlWriter {
    type Clause = CqlClause;

    fn backend_name(&self) -> &'static str {
        "cassandra"
    }

    fn identifier<'a>(&self, name: &'a str) -> Result<Cow<'a, str>> {
        Ok(quote_identifier(name))
    }

    fn match_all(&self) -> CqlClause {
        CqlClause::default()
    }

    fn predicate(&self, field: &str, operator: Operator, value: &Value) -> Result<CqlClause> {
        let operator = match operator {
            Operator::Equals => "=",
            Operator::Greater => ">",
            Operator::GreaterEquals => ">=",
            Operator::Lesser => "<",
            Operator::LesserEquals => "<=",
            Operator::Like => "LIKE",
            Operator::In => {
                let values = value
                    .sequence()
                    .map(|v| v.collect::<Vec<_>>())
                    .unwrap_or_default();
                return self.membership(field, &values);
            }
        };
        Ok(CqlClause(vec![format!(
            "{} {} {}",
            field,
            operator,
            self.literal(value)
        )]))
    }

    fn membership(&self, field: &str, values: &[&Value]) -> Result<CqlClause> {
        let mut out = String::with_capacity(field.len() + values.len() * 8 + 8);
        out.push_str(field);
        out.push_str(" IN (");
        separated_by(
            &mut out,
            values,
            |out, v| out.push_str(self.literal(v).as_str()),
            ", ",
        );
        out.push(')');
        Ok(CqlClause(vec![out]))
    }

    fn range(&self, field: &str, lower: &Value, upper: &Value) -> Result<CqlClause> {
        Ok(CqlClause(vec![
            format!("{} >= {}", field, self.literal(lower)),
            format!("{} <= {}", field, self.literal(upper)),
        ]))
    }

    fn conjunction(&self, clauses: Vec<CqlClause>) -> Result<CqlClause> {
        Ok(CqlClause(clauses.into_iter().flat_map(|v| v.0).collect()))
    }

    fn disjunction(&self, _clauses: Vec<CqlClause>) -> Result<CqlClause> {
        TranslationError::unsupported(self.backend_name(), "disjunction (OR)").raise()
    }

    fn negation(&self, _clause: CqlClause) -> Result<CqlClause> {
        TranslationError::unsupported(self.backend_name(), "negation (NOT)").raise()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_is_sorted() {
        assert!(RESERVED.windows(2).all(|v| v[0] < v[1]));
    }

    #[test]
    fn identifiers() {
        assert_eq!(quote_identifier("name"), "name");
        assert_eq!(quote_identifier("zip_code2"), "zip_code2");
        assert_eq!(quote_identifier("_internal"), "\"_internal\"");
        assert_eq!(quote_identifier("firstName"), "\"firstName\"");
        assert_eq!(quote_identifier("select"), "\"select\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(quote_identifier("1st"), "\"1st\"");
    }

    #[test]
    fn sorts_and_projection() {
        let writer = CqlWriter;
        assert_eq!(
            writer.map_sorts(&[Sort::asc("name"), Sort::desc("_age")]),
            ["name ASC", "\"_age\" DESC"]
        );
        assert_eq!(writer.map_projection(&[]), ["*"]);
        assert_eq!(
            writer.map_projection(&["name".into(), "Age".into()]),
            ["name", "\"Age\""]
        );
    }
}
