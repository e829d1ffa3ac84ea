use crate::{
    CqlLiteral, CqlRegistry, KeyspaceMetadata, SchemaCatalog, UserDefinedType, cql_type::protocol,
    quote_identifier,
};
use std::{
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
};
use vessel_core::{
    Encoder, Field, FieldKind, Result, SchemaPath, SchemaStage, Structured, StructuredItem,
    TranslationError, coerce,
};

/// Value of a user defined type, fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UdtValue {
    user_type: String,
    field_names: Vec<String>,
    values: Vec<Option<CqlLiteral>>,
}

impl UdtValue {
    /// Blank value of `definition`, every field unset.
    pub fn new(definition: &UserDefinedType) -> Self {
        Self {
            user_type: definition.name.clone(),
            field_names: definition.field_names.clone(),
            values: vec![None; definition.field_names.len()],
        }
    }
    pub fn user_type(&self) -> &str {
        &self.user_type
    }
    pub fn set(&mut self, index: usize, value: CqlLiteral) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = Some(value);
        }
    }
    pub fn get(&self, name: &str) -> Option<&CqlLiteral> {
        let index = self.field_names.iter().position(|v| v == name)?;
        self.values[index].as_ref()
    }
}

impl Display for UdtValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.field_names.iter().zip(&self.values).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: ", quote_identifier(name))?;
            match value {
                Some(v) => write!(f, "{}", v)?,
                None => f.write_str("null")?,
            }
        }
        f.write_str("}")
    }
}

/// Result of resolving a structured field against the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredValue {
    Single(UdtValue),
    List(Vec<UdtValue>),
    /// Set column, duplicates collapse.
    Set(BTreeSet<UdtValue>),
}

impl StructuredValue {
    pub fn len(&self) -> usize {
        match self {
            StructuredValue::Single(..) => 1,
            StructuredValue::List(v) => v.len(),
            StructuredValue::Set(v) => v.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for StructuredValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fn elements<'a>(
            f: &mut Formatter<'_>,
            values: impl Iterator<Item = &'a UdtValue>,
        ) -> fmt::Result {
            for (i, v) in values.enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", v)?;
            }
            Ok(())
        }
        match self {
            StructuredValue::Single(v) => write!(f, "{}", v),
            StructuredValue::List(v) => {
                f.write_str("[")?;
                elements(f, v.iter())?;
                f.write_str("]")
            }
            StructuredValue::Set(v) => {
                f.write_str("{")?;
                elements(f, v.iter())?;
                f.write_str("}")
            }
        }
    }
}

/// Resolve the structured field `name` of the row of `keyspace.table`.
///
/// Metadata is looked up on every call: keyspace, table, column and then the user type, the
/// first miss is reported with the whole path attempted. The value is a collection when the
/// structured field holds nested elements (a set if the column is a set, a list otherwise),
/// the single composite value otherwise.
pub fn resolve_structured<C: SchemaCatalog + ?Sized>(
    catalog: &C,
    keyspace: &str,
    table: &str,
    name: &str,
    structured: &Structured,
) -> Result<StructuredValue> {
    let mut path = SchemaPath {
        keyspace: keyspace.into(),
        ..Default::default()
    };
    let Some(keyspace) = catalog.keyspace(keyspace) else {
        return schema_not_found(SchemaStage::Keyspace, path);
    };
    path.table = Some(table.into());
    let Some(table) = keyspace.table(table) else {
        return schema_not_found(SchemaStage::Table, path);
    };
    path.column = Some(name.into());
    let Some(column) = table.column(name) else {
        return schema_not_found(SchemaStage::Column, path);
    };
    build(keyspace, path, column.data_type.protocol_code(), structured)
}

fn schema_not_found<T>(stage: SchemaStage, path: SchemaPath) -> Result<T> {
    TranslationError::SchemaNotFound { stage, path }.raise()
}

fn build(
    keyspace: &KeyspaceMetadata,
    mut path: SchemaPath,
    container: u16,
    structured: &Structured,
) -> Result<StructuredValue> {
    path.user_type = Some(structured.user_type.clone());
    let Some(definition) = keyspace.user_type(&structured.user_type) else {
        return schema_not_found(SchemaStage::UserType, path);
    };
    let mut single = UdtValue::new(definition);
    let mut elements = Vec::new();
    for item in &structured.items {
        match item {
            StructuredItem::Field(field) => fill(keyspace, &path, definition, &mut single, field)?,
            StructuredItem::Nested(fields) => {
                let mut element = UdtValue::new(definition);
                for field in fields {
                    fill(keyspace, &path, definition, &mut element, field)?;
                }
                elements.push(element);
            }
        }
    }
    Ok(if elements.is_empty() {
        StructuredValue::Single(single)
    } else if container == protocol::SET {
        StructuredValue::Set(elements.into_iter().collect())
    } else {
        StructuredValue::List(elements)
    })
}

fn fill(
    keyspace: &KeyspaceMetadata,
    path: &SchemaPath,
    definition: &UserDefinedType,
    target: &mut UdtValue,
    field: &Field,
) -> Result<()> {
    let Some(index) = definition.field_index(&field.name) else {
        let value = match &field.kind {
            FieldKind::Scalar(v) => coerce(&CqlRegistry, v).to_string(),
            FieldKind::Structured(v) => format!("<{}>", v.user_type),
        };
        return TranslationError::FieldNotInSchema {
            field: field.name.clone(),
            value,
            available: definition.field_names.clone(),
            user_type: definition.name.clone(),
        }
        .raise();
    };
    let declared = &definition.field_types[index];
    let literal = match &field.kind {
        FieldKind::Scalar(v) => declared.encode(v),
        FieldKind::Structured(v) => {
            let mut path = path.clone();
            path.column = Some(format!(
                "{}.{}",
                path.column.as_deref().unwrap_or_default(),
                field.name
            ));
            CqlLiteral::new(build(keyspace, path, declared.protocol_code(), v)?.to_string())
        }
    };
    target.set(index, literal);
    Ok(())
}
