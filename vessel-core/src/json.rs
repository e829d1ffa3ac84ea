use crate::{CodecRegistry, Encoder, Field, FieldKind, StructuredItem, Value, coerce};
use serde_json::{Map, Number, Value as Json};

/// Encoders of the JSON based stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonEncoder {
    Null,
    Bool,
    Int,
    UInt,
    Float,
    Text,
    Array,
    Object,
}

/// Codec registry of the JSON based stores: booleans, integers up to 64 bits, finite floats,
/// text, sequences and maps with text keys. Everything else goes through normalization.
#[derive(Default, Debug, Clone, Copy)]
pub struct JsonRegistry;

impl Encoder for JsonEncoder {
    type Literal = Json;

    fn encode(&self, value: &Value) -> Json {
        match (self, value) {
            (JsonEncoder::Bool, Value::Boolean(Some(v))) => Json::Bool(*v),
            (JsonEncoder::Int, Value::Int8(Some(v))) => Json::from(*v),
            (JsonEncoder::Int, Value::Int16(Some(v))) => Json::from(*v),
            (JsonEncoder::Int, Value::Int32(Some(v))) => Json::from(*v),
            (JsonEncoder::Int, Value::Int64(Some(v))) => Json::from(*v),
            (JsonEncoder::UInt, Value::UInt8(Some(v))) => Json::from(*v),
            (JsonEncoder::UInt, Value::UInt16(Some(v))) => Json::from(*v),
            (JsonEncoder::UInt, Value::UInt32(Some(v))) => Json::from(*v),
            (JsonEncoder::UInt, Value::UInt64(Some(v))) => Json::from(*v),
            (JsonEncoder::Float, Value::Float32(Some(v))) => float(*v as f64),
            (JsonEncoder::Float, Value::Float64(Some(v))) => float(*v),
            (JsonEncoder::Text, Value::Varchar(Some(v))) => Json::String(v.clone()),
            (JsonEncoder::Array, v) => Json::Array(
                v.sequence()
                    .into_iter()
                    .flatten()
                    .map(|v| coerce(&JsonRegistry, v))
                    .collect(),
            ),
            (JsonEncoder::Object, Value::Map(Some(v), ..)) => Json::Object(
                v.iter()
                    .filter_map(|(k, v)| match k {
                        Value::Varchar(Some(k)) => Some((k.clone(), coerce(&JsonRegistry, v))),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => Json::Null,
        }
    }
}

fn float(value: f64) -> Json {
    Number::from_f64(value).map(Json::Number).unwrap_or(Json::Null)
}

impl CodecRegistry for JsonRegistry {
    type Encoder = JsonEncoder;

    fn resolve(&self, value: &Value) -> Option<JsonEncoder> {
        Some(match value {
            v if v.is_null() => JsonEncoder::Null,
            Value::Boolean(..) => JsonEncoder::Bool,
            Value::Int8(..) | Value::Int16(..) | Value::Int32(..) | Value::Int64(..) => {
                JsonEncoder::Int
            }
            Value::UInt8(..) | Value::UInt16(..) | Value::UInt32(..) | Value::UInt64(..) => {
                JsonEncoder::UInt
            }
            Value::Float32(Some(v)) if v.is_finite() => JsonEncoder::Float,
            Value::Float64(Some(v)) if v.is_finite() => JsonEncoder::Float,
            Value::Varchar(..) => JsonEncoder::Text,
            Value::List(..) | Value::Set(..) => {
                if value.sequence()?.all(|v| self.resolve(v).is_some()) {
                    JsonEncoder::Array
                } else {
                    return None;
                }
            }
            Value::Map(Some(v), ..) => {
                if v.iter().all(|(k, v)| {
                    matches!(k, Value::Varchar(Some(..))) && self.resolve(v).is_some()
                }) {
                    JsonEncoder::Object
                } else {
                    return None;
                }
            }
            _ => return None,
        })
    }

    fn generic(&self, value: &Value) -> Json {
        match value {
            Value::Boolean(Some(v)) => Json::Bool(*v),
            Value::Int64(Some(v)) => Json::from(*v),
            Value::Float64(Some(v)) => float(*v),
            Value::Varchar(Some(v)) => Json::String(v.clone()),
            Value::List(Some(v), ..) => Json::Array(v.iter().map(|v| self.generic(v)).collect()),
            Value::Map(Some(v), ..) => Json::Object(
                v.iter()
                    .map(|(k, v)| {
                        let key = match k {
                            Value::Varchar(Some(k)) => k.clone(),
                            k => format!("{:?}", k),
                        };
                        (key, self.generic(v))
                    })
                    .collect(),
            ),
            _ => Json::Null,
        }
    }
}

/// Nested JSON document for `fields`, structured fields become sub documents (or arrays of
/// sub documents when they hold a collection of composites).
pub fn write_document(fields: &[Field]) -> Map<String, Json> {
    fields
        .iter()
        .map(|field| (field.name.clone(), write_field(field)))
        .collect()
}

pub fn write_field(field: &Field) -> Json {
    match &field.kind {
        FieldKind::Scalar(value) => coerce(&JsonRegistry, value),
        FieldKind::Structured(structured) => {
            let mut document = Map::new();
            let mut elements = Vec::new();
            for item in &structured.items {
                match item {
                    StructuredItem::Field(field) => {
                        document.insert(field.name.clone(), write_field(field));
                    }
                    StructuredItem::Nested(fields) => {
                        elements.push(Json::Object(write_document(fields)));
                    }
                }
            }
            if elements.is_empty() {
                Json::Object(document)
            } else {
                Json::Array(elements)
            }
        }
    }
}
