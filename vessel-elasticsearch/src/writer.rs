use serde_json::{Value as Json, json};
use vessel_core::{
    ConditionTranslator, JsonRegistry, Operator, Order, Result, Sort, TranslationError, Value,
    coerce,
};

/// Wildcard pattern equivalent to a `LIKE` pattern.
pub fn like_to_wildcard(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    for c in pattern.chars() {
        match c {
            '%' => out.push('*'),
            '_' => out.push('?'),
            '*' | '?' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Builds the query DSL.
#[derive(Default, Debug, Clone, Copy)]
pub struct ElasticWriter;

impl ElasticWriter {
    pub fn literal(&self, value: &Value) -> Json {
        coerce(&JsonRegistry, value)
    }

    /// `sort` array, `None` keeps the relevance order.
    pub fn map_sorts(&self, sorts: &[Sort]) -> Option<Json> {
        if sorts.is_empty() {
            return None;
        }
        Some(Json::Array(
            sorts
                .iter()
                .map(|v| {
                    let order = match v.order {
                        Order::ASC => "asc",
                        Order::DESC => "desc",
                    };
                    json!({ v.name.as_str(): { "order": order } })
                })
                .collect(),
        ))
    }

    /// `_source` filter, `None` returns the whole document.
    pub fn map_projection(&self, fields: &[String]) -> Option<Json> {
        if fields.is_empty() {
            return None;
        }
        Some(json!(fields))
    }
}

impl ConditionTranslator for ElasticWriter {
    type Clause = Json;

    fn backend_name(&self) -> &'static str {
        "elasticsearch"
    }

    fn match_all(&self) -> Json {
        json!({ "match_all": {} })
    }

    fn predicate(&self, field: &str, operator: Operator, value: &Value) -> Result<Json> {
        let bound = match operator {
            Operator::Equals => return Ok(json!({ "term": { field: self.literal(value) } })),
            Operator::Greater => "gt",
            Operator::GreaterEquals => "gte",
            Operator::Lesser => "lt",
            Operator::LesserEquals => "lte",
            Operator::Like => {
                let Value::Varchar(Some(pattern)) = value else {
                    return TranslationError::invalid_condition(
                        &(field, value),
                        "the pattern of LIKE must be text",
                    )
                    .raise();
                };
                return Ok(json!({
                    "wildcard": { field: { "value": like_to_wildcard(pattern) } }
                }));
            }
            Operator::In => {
                let values = value
                    .sequence()
                    .map(|v| v.collect::<Vec<_>>())
                    .unwrap_or_default();
                return self.membership(field, &values);
            }
        };
        Ok(json!({ "range": { field: { bound: self.literal(value) } } }))
    }

    fn membership(&self, field: &str, values: &[&Value]) -> Result<Json> {
        let values = values.iter().map(|v| self.literal(v)).collect::<Vec<_>>();
        Ok(json!({ "terms": { field: values } }))
    }

    fn range(&self, field: &str, lower: &Value, upper: &Value) -> Result<Json> {
        Ok(json!({
            "range": {
                field: {
                    "gte": self.literal(lower),
                    "lte": self.literal(upper),
                }
            }
        }))
    }

    fn conjunction(&self, clauses: Vec<Json>) -> Result<Json> {
        Ok(json!({ "bool": { "must": clauses } }))
    }

    fn disjunction(&self, clauses: Vec<Json>) -> Result<Json> {
        Ok(json!({ "bool": { "should": clauses, "minimum_should_match": 1 } }))
    }

    fn negation(&self, clause: Json) -> Result<Json> {
        Ok(json!({ "bool": { "must_not": [clause] } }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards() {
        assert_eq!(like_to_wildcard("J_n%"), "J?n*");
        assert_eq!(like_to_wildcard("100%*"), "100*\\*");
    }

    #[test]
    fn sorts_and_projection() {
        let writer = ElasticWriter;
        assert_eq!(
            writer.map_sorts(&[Sort::asc("name"), Sort::desc("age")]),
            Some(json!([
                { "name": { "order": "asc" } },
                { "age": { "order": "desc" } },
            ]))
        );
        assert_eq!(writer.map_sorts(&[]), None);
        assert_eq!(writer.map_projection(&[]), None);
        assert_eq!(
            writer.map_projection(&["name".into(), "age".into()]),
            Some(json!(["name", "age"]))
        );
    }
}
