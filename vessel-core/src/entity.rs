use crate::Field;

/// A record of a collection (table, document collection, index).
///
/// Field names are unique: adding a field with an existing name replaces it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    fields: Vec<Field>,
    key: Option<String>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            key: None,
        }
    }

    /// Mark the field `key` as the primary identifier.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with(mut self, field: Field) -> Self {
        self.add(field);
        self
    }

    pub fn add(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn find(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// A copy of this entity without the field `name`.
    pub fn without(&self, name: &str) -> Entity {
        Entity {
            name: self.name.clone(),
            fields: self
                .fields
                .iter()
                .filter(|f| f.name != name)
                .cloned()
                .collect(),
            key: self.key.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
