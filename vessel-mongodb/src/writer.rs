use serde_json::{Map, Value as Json, json};
use std::borrow::Cow;
use vessel_core::{
    ConditionTranslator, JsonRegistry, Operator, Order, Result, Sort, TranslationError, Value,
    coerce,
};

/// Anchored regular expression equivalent to a `LIKE` pattern (`%` any run, `_` any char).
pub fn like_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');
    for c in pattern.chars() {
        match c {
            '%' => out.push_str(".*"),
            '_' => out.push('.'),
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push('$');
    out
}

/// Builds MongoDB query filters, sort and projection documents.
#[derive(Default, Debug, Clone, Copy)]
pub struct MongoWriter;

impl MongoWriter {
    pub fn literal(&self, value: &Value) -> Json {
        coerce(&JsonRegistry, value)
    }

    fn operator(&self, field: &str, operator: &str, value: Json) -> Json {
        let mut inner = Map::new();
        inner.insert(operator.into(), value);
        let mut outer = Map::new();
        outer.insert(field.into(), Json::Object(inner));
        Json::Object(outer)
    }

    /// Sort document, `1` ascending and `-1` descending. `None` without sorts.
    pub fn map_sorts(&self, sorts: &[Sort]) -> Result<Option<Json>> {
        if sorts.is_empty() {
            return Ok(None);
        }
        let sort = sorts
            .iter()
            .map(|v| -> Result<(String, Json)> {
                let direction = match v.order {
                    Order::ASC => 1,
                    Order::DESC => -1,
                };
                Ok((self.identifier(&v.name)?.into_owned(), Json::from(direction)))
            })
            .collect::<Result<Map<_, _>>>()?;
        Ok(Some(Json::Object(sort)))
    }

    /// Inclusion projection, `None` returns the whole document.
    pub fn map_projection(&self, fields: &[String]) -> Result<Option<Json>> {
        if fields.is_empty() {
            return Ok(None);
        }
        let projection = fields
            .iter()
            .map(|v| -> Result<(String, Json)> {
                Ok((self.identifier(v)?.into_owned(), Json::from(1)))
            })
            .collect::<Result<Map<_, _>>>()?;
        Ok(Some(Json::Object(projection)))
    }
}

impl ConditionTranslator for MongoWriter {
    type Clause = Json;

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    fn identifier<'a>(&self, name: &'a str) -> Result<Cow<'a, str>> {
        if name.starts_with('$') {
            return TranslationError::invalid_condition(
                &name,
                "field names cannot start with `$`",
            )
            .raise();
        }
        Ok(Cow::Borrowed(name))
    }

    fn match_all(&self) -> Json {
        json!({})
    }

    fn predicate(&self, field: &str, operator: Operator, value: &Value) -> Result<Json> {
        let operator = match operator {
            Operator::Equals => "$eq",
            Operator::Greater => "$gt",
            Operator::GreaterEquals => "$gte",
            Operator::Lesser => "$lt",
            Operator::LesserEquals => "$lte",
            Operator::Like => {
                let Value::Varchar(Some(pattern)) = value else {
                    return TranslationError::invalid_condition(
                        &(field, value),
                        "the pattern of LIKE must be text",
                    )
                    .raise();
                };
                return Ok(self.operator(field, "$regex", Json::String(like_to_regex(pattern))));
            }
            Operator::In => {
                let values = value
                    .sequence()
                    .map(|v| v.collect::<Vec<_>>())
                    .unwrap_or_default();
                return self.membership(field, &values);
            }
        };
        Ok(self.operator(field, operator, self.literal(value)))
    }

    fn membership(&self, field: &str, values: &[&Value]) -> Result<Json> {
        let values = values.iter().map(|v| self.literal(v)).collect();
        Ok(self.operator(field, "$in", Json::Array(values)))
    }

    fn range(&self, field: &str, lower: &Value, upper: &Value) -> Result<Json> {
        Ok(json!({
            field: {
                "$gte": self.literal(lower),
                "$lte": self.literal(upper),
            }
        }))
    }

    fn conjunction(&self, clauses: Vec<Json>) -> Result<Json> {
        Ok(json!({ "$and": clauses }))
    }

    fn disjunction(&self, clauses: Vec<Json>) -> Result<Json> {
        Ok(json!({ "$or": clauses }))
    }

    fn negation(&self, clause: Json) -> Result<Json> {
        Ok(json!({ "$nor": [clause] }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_patterns() {
        assert_eq!(like_to_regex("%@example.com"), "^.*@example\\.com$");
        assert_eq!(like_to_regex("J_n%"), "^J.n.*$");
        assert_eq!(like_to_regex("(a+b)"), "^\\(a\\+b\\)$");
    }

    #[test]
    fn sorts_and_projection() {
        let writer = MongoWriter;
        assert_eq!(
            writer
                .map_sorts(&[Sort::asc("name"), Sort::desc("age")])
                .expect("Valid sorts")
                .map(|v| v.to_string()),
            Some(r#"{"name":1,"age":-1}"#.to_string())
        );
        assert_eq!(writer.map_sorts(&[]).expect("Valid sorts"), None);
        assert_eq!(writer.map_projection(&[]).expect("Valid projection"), None);
        assert_eq!(
            writer
                .map_projection(&["name".into()])
                .expect("Valid projection"),
            Some(json!({ "name": 1 }))
        );
    }

    #[test]
    fn reserved_names() {
        let writer = MongoWriter;
        assert!(writer.map_sorts(&[Sort::asc("$where")]).is_err());
        assert!(writer.map_projection(&["$x".into()]).is_err());
    }
}
