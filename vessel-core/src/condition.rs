use crate::Value;
use std::{
    fmt::{self, Display, Formatter},
    ops::{BitAnd, BitOr, Not},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    Greater,
    GreaterEquals,
    Lesser,
    LesserEquals,
    In,
    Like,
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Equals => "Equals",
            Operator::Greater => "Greater",
            Operator::GreaterEquals => "GreaterEquals",
            Operator::Lesser => "Lesser",
            Operator::LesserEquals => "LesserEquals",
            Operator::In => "In",
            Operator::Like => "Like",
        })
    }
}

/// Backend-neutral selection condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Comparison {
        field: String,
        operator: Operator,
        value: Value,
    },
    /// Inclusive on both ends.
    Between {
        field: String,
        lower: Value,
        upper: Value,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn compare(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Condition::Comparison {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Equals, value)
    }
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Greater, value)
    }
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::GreaterEquals, value)
    }
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::Lesser, value)
    }
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Operator::LesserEquals, value)
    }
    pub fn is_in(field: impl Into<String>, values: impl Into<Value>) -> Self {
        Self::compare(field, Operator::In, values)
    }
    /// SQL style pattern: `%` matches any sequence, `_` a single character.
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::compare(field, Operator::Like, pattern.into())
    }
    pub fn between(
        field: impl Into<String>,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
    ) -> Self {
        Condition::Between {
            field: field.into(),
            lower: lower.into(),
            upper: upper.into(),
        }
    }
    pub fn and(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(conditions.into_iter().collect())
    }
    pub fn or(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Or(conditions.into_iter().collect())
    }
    pub fn negate(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Conjunction with `other`, appended to `self` when it is already a conjunction.
    pub fn and_also(self, other: Condition) -> Self {
        match self {
            Condition::And(mut conditions) => {
                conditions.push(other);
                Condition::And(conditions)
            }
            v => Condition::And(vec![v, other]),
        }
    }

    /// Disjunction with `other`, appended to `self` when it is already a disjunction.
    pub fn or_else(self, other: Condition) -> Self {
        match self {
            Condition::Or(mut conditions) => {
                conditions.push(other);
                Condition::Or(conditions)
            }
            v => Condition::Or(vec![v, other]),
        }
    }
}

impl Not for Condition {
    type Output = Condition;
    fn not(self) -> Self::Output {
        Condition::negate(self)
    }
}

impl BitAnd for Condition {
    type Output = Condition;
    fn bitand(self, rhs: Self) -> Self::Output {
        self.and_also(rhs)
    }
}

impl BitOr for Condition {
    type Output = Condition;
    fn bitor(self, rhs: Self) -> Self::Output {
        self.or_else(rhs)
    }
}
