use crate::Error;
use std::fmt::{self, Display, Formatter};

/// Stage of the structured type lookup that could not be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStage {
    Keyspace,
    Table,
    Column,
    UserType,
}

impl Display for SchemaStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchemaStage::Keyspace => "keyspace",
            SchemaStage::Table => "table",
            SchemaStage::Column => "column",
            SchemaStage::UserType => "user type",
        })
    }
}

/// Chain of schema identifiers attempted while resolving a structured type.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SchemaPath {
    pub keyspace: String,
    pub table: Option<String>,
    pub column: Option<String>,
    pub user_type: Option<String>,
}

impl Display for SchemaPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "keyspace `{}`", self.keyspace)?;
        if let Some(table) = &self.table {
            write!(f, " > table `{}`", table)?;
        }
        if let Some(column) = &self.column {
            write!(f, " > column `{}`", column)?;
        }
        if let Some(user_type) = &self.user_type {
            write!(f, " > type `{}`", user_type)?;
        }
        Ok(())
    }
}

/// Errors raised while translating backend-neutral queries and entities.
///
/// They always travel inside [`Error`](crate::Error), use `downcast_ref` to inspect them.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("Invalid condition `{condition}`: {reason}")]
    InvalidCondition { condition: String, reason: String },
    #[error("{backend} does not support {operation}")]
    UnsupportedOperation {
        backend: &'static str,
        operation: String,
    },
    #[error("Missing {stage} definition while resolving {path}")]
    SchemaNotFound { stage: SchemaStage, path: SchemaPath },
    #[error(
        "There is no field `{field}` (value: {value}) in the user type `{user_type}`, the fields available are {available:?}"
    )]
    FieldNotInSchema {
        field: String,
        value: String,
        available: Vec<String>,
        user_type: String,
    },
    #[error("The entity `{collection}` has no `{key}` field, it is required to match the record")]
    MissingKey { collection: String, key: String },
}

impl TranslationError {
    pub fn invalid_condition(condition: &impl fmt::Debug, reason: impl Into<String>) -> Self {
        TranslationError::InvalidCondition {
            condition: format!("{:?}", condition),
            reason: reason.into(),
        }
    }

    pub fn unsupported(backend: &'static str, operation: impl Into<String>) -> Self {
        TranslationError::UnsupportedOperation {
            backend,
            operation: operation.into(),
        }
    }

    /// Log and return the error.
    pub fn raise<T>(self) -> Result<T, Error> {
        let error = Error::new(self);
        log::error!("{:#}", error);
        Err(error)
    }
}
