use crate::{Condition, Operator, Result, TranslationError, Value};
use std::borrow::Cow;

/// Dialect builder turning a [`Condition`] tree into a native clause.
///
/// The tree walk is shared, each backend supplies the native primitives.
pub trait ConditionTranslator {
    type Clause;

    /// Name used in error messages.
    fn backend_name(&self) -> &'static str;

    /// Field name as it must appear in the native clause.
    fn identifier<'a>(&self, name: &'a str) -> Result<Cow<'a, str>> {
        Ok(Cow::Borrowed(name))
    }

    /// Clause matching every record.
    fn match_all(&self) -> Self::Clause;

    /// Single value predicate, `operator` is never `In`.
    fn predicate(&self, field: &str, operator: Operator, value: &Value) -> Result<Self::Clause>;

    /// Membership test against the elements of a sequence.
    fn membership(&self, field: &str, values: &[&Value]) -> Result<Self::Clause>;

    /// Inclusive range.
    fn range(&self, field: &str, lower: &Value, upper: &Value) -> Result<Self::Clause>;

    fn conjunction(&self, clauses: Vec<Self::Clause>) -> Result<Self::Clause>;

    fn disjunction(&self, clauses: Vec<Self::Clause>) -> Result<Self::Clause>;

    fn negation(&self, _clause: Self::Clause) -> Result<Self::Clause> {
        TranslationError::unsupported(self.backend_name(), "negation").raise()
    }

    /// Translate an optional condition, a missing one matches everything.
    fn translate(&self, condition: Option<&Condition>) -> Result<Self::Clause> {
        match condition {
            None => Ok(self.match_all()),
            Some(condition) => self.translate_condition(condition),
        }
    }

    fn translate_condition(&self, condition: &Condition) -> Result<Self::Clause> {
        match condition {
            Condition::Comparison {
                field,
                operator: Operator::In,
                value,
            } => {
                let Some(values) = value.sequence() else {
                    return TranslationError::invalid_condition(
                        condition,
                        format!("the value of `{}` IN must be a list or a set", field),
                    )
                    .raise();
                };
                let values = values.collect::<Vec<_>>();
                self.membership(&self.identifier(field)?, &values)
            }
            Condition::Comparison {
                field,
                operator,
                value,
            } => self.predicate(&self.identifier(field)?, *operator, value),
            Condition::Between {
                field,
                lower,
                upper,
            } => self.range(&self.identifier(field)?, lower, upper),
            Condition::And(conditions) | Condition::Or(conditions) => {
                if conditions.is_empty() {
                    return TranslationError::invalid_condition(
                        condition,
                        "a boolean composition requires at least one condition",
                    )
                    .raise();
                }
                let clauses = conditions
                    .iter()
                    .map(|c| self.translate_condition(c))
                    .collect::<Result<Vec<_>>>()?;
                if matches!(condition, Condition::And(..)) {
                    self.conjunction(clauses)
                } else {
                    self.disjunction(clauses)
                }
            }
            Condition::Not(condition) => self.negation(self.translate_condition(condition)?),
        }
    }
}
