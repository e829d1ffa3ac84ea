use crate::Value;

/// Named value of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A scalar or a collection of scalars.
    Scalar(Value),
    /// A composite value (or a collection of composite values) of a user type.
    Structured(Structured),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Structured {
    /// Logical name of the user type.
    pub user_type: String,
    pub items: Vec<StructuredItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StructuredItem {
    /// Sub field of a single composite.
    Field(Field),
    /// One composite element of a collection.
    Nested(Vec<Field>),
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar(value.into()),
        }
    }

    /// Single composite value made of `fields`.
    pub fn structured(
        name: impl Into<String>,
        user_type: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Structured(Structured {
                user_type: user_type.into(),
                items: fields.into_iter().map(StructuredItem::Field).collect(),
            }),
        }
    }

    /// Collection of composite values, one per element of `elements`.
    pub fn structured_collection(
        name: impl Into<String>,
        user_type: impl Into<String>,
        elements: impl IntoIterator<Item = Vec<Field>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Structured(Structured {
                user_type: user_type.into(),
                items: elements.into_iter().map(StructuredItem::Nested).collect(),
            }),
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match &self.kind {
            FieldKind::Scalar(v) => Some(v),
            FieldKind::Structured(..) => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.kind, FieldKind::Structured(..))
    }
}
