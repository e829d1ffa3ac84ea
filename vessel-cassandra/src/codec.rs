use crate::{CqlType, quote_identifier};
use std::fmt::{self, Display, Formatter, Write};
use time::{OffsetDateTime, UtcOffset};
use vessel_core::{CodecRegistry, Encoder, Value, coerce, date_text, separated_by, time_text};

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($out:ident, $value:expr) => {{
        if $value.is_nan() {
            $out.push_str("NaN");
        } else if $value.is_infinite() {
            if $value.is_sign_negative() {
                $out.push('-');
            }
            $out.push_str("Infinity");
        } else {
            let mut buffer = ryu::Buffer::new();
            $out.push_str(buffer.format($value));
        }
    }};
}

/// A CQL literal, ready to be placed in a statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CqlLiteral(String);

impl CqlLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
    pub fn null() -> Self {
        Self("null".into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CqlLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Codecs known to CQL, resolved from the runtime kind of a value.
///
/// Nulls and collections that are not homogeneous have no codec.
#[derive(Default, Debug, Clone, Copy)]
pub struct CqlRegistry;

impl CqlRegistry {
    fn element_type<'a>(&self, values: impl Iterator<Item = &'a Value>) -> Option<CqlType> {
        let mut result: Option<CqlType> = None;
        for value in values {
            let current = self.resolve(value)?;
            match &result {
                Some(previous) if *previous != current => return None,
                Some(..) => {}
                None => result = Some(current),
            }
        }
        // The element type of an empty collection does not change its literal.
        Some(result.unwrap_or(CqlType::Text))
    }
}

impl CodecRegistry for CqlRegistry {
    type Encoder = CqlType;

    fn resolve(&self, value: &Value) -> Option<CqlType> {
        Some(match value {
            v if v.is_null() => return None,
            Value::Boolean(..) => CqlType::Boolean,
            Value::Int8(..) => CqlType::Tinyint,
            Value::Int16(..) | Value::UInt8(..) => CqlType::Smallint,
            Value::Int32(..) | Value::UInt16(..) => CqlType::Int,
            Value::Int64(..) | Value::UInt32(..) => CqlType::Bigint,
            Value::Int128(..) | Value::UInt64(..) | Value::UInt128(..) => CqlType::Varint,
            Value::Float32(..) => CqlType::Float,
            Value::Float64(..) => CqlType::Double,
            Value::Decimal(..) => CqlType::Decimal,
            Value::Varchar(..) => CqlType::Text,
            Value::Blob(..) => CqlType::Blob,
            Value::Date(..) => CqlType::Date,
            Value::Time(..) => CqlType::Time,
            Value::Timestamp(..) | Value::TimestampWithTimezone(..) => CqlType::Timestamp,
            Value::Uuid(..) => CqlType::Uuid,
            Value::List(..) => CqlType::List(self.element_type(value.sequence()?)?.into()),
            Value::Set(..) => CqlType::Set(self.element_type(value.sequence()?)?.into()),
            Value::Map(Some(v), ..) => CqlType::Map(
                self.element_type(v.keys())?.into(),
                self.element_type(v.values())?.into(),
            ),
            _ => return None,
        })
    }

    fn generic(&self, value: &Value) -> CqlLiteral {
        let mut out = String::new();
        write_generic(&mut out, value);
        CqlLiteral(out)
    }
}

fn write_generic(out: &mut String, value: &Value) {
    match value {
        Value::Boolean(Some(v)) => out.push_str(if *v { "true" } else { "false" }),
        Value::Int64(Some(v)) => write_integer!(out, *v),
        Value::Float64(Some(v)) => write_float!(out, *v),
        Value::Varchar(Some(v)) => write_string(out, v),
        Value::List(Some(v), ..) => {
            out.push('[');
            separated_by(out, v, write_generic, ", ");
            out.push(']');
        }
        Value::Map(Some(v), ..) => {
            out.push('{');
            separated_by(
                out,
                v,
                |out, (k, v)| {
                    write_generic(out, k);
                    out.push_str(": ");
                    write_generic(out, v);
                },
                ", ",
            );
            out.push('}');
        }
        _ => out.push_str("null"),
    }
}

impl Encoder for CqlType {
    type Literal = CqlLiteral;

    /// Literal of `value` for this declared type. A value that does not fit is encoded by its
    /// own runtime kind instead.
    fn encode(&self, value: &Value) -> CqlLiteral {
        let mut out = String::new();
        if write_as(&mut out, self, value) {
            CqlLiteral(out)
        } else {
            log::trace!(
                "{:?} does not fit the declared type {}, encoding it by its own kind",
                value,
                self
            );
            coerce(&CqlRegistry, value)
        }
    }
}

pub(crate) fn write_string(out: &mut String, value: &str) {
    out.push('\'');
    let mut position = 0;
    for (i, c) in value.char_indices() {
        if c == '\'' {
            out.push_str(&value[position..i]);
            out.push_str("''");
            position = i + 1;
        }
    }
    out.push_str(&value[position..]);
    out.push('\'');
}

fn write_timestamp(out: &mut String, value: &OffsetDateTime) {
    let value = value.to_offset(UtcOffset::UTC);
    let _ = write!(
        out,
        "'{}T{:02}:{:02}:{:02}.{:03}+0000'",
        date_text(&value.date()),
        value.hour(),
        value.minute(),
        value.second(),
        value.millisecond()
    );
}

fn write_integer(out: &mut String, value: &Value) -> bool {
    match value {
        Value::Int8(Some(v)) => write_integer!(out, *v),
        Value::Int16(Some(v)) => write_integer!(out, *v),
        Value::Int32(Some(v)) => write_integer!(out, *v),
        Value::Int64(Some(v)) => write_integer!(out, *v),
        Value::Int128(Some(v)) => write_integer!(out, *v),
        Value::UInt8(Some(v)) => write_integer!(out, *v),
        Value::UInt16(Some(v)) => write_integer!(out, *v),
        Value::UInt32(Some(v)) => write_integer!(out, *v),
        Value::UInt64(Some(v)) => write_integer!(out, *v),
        Value::UInt128(Some(v)) => write_integer!(out, *v),
        _ => return false,
    }
    true
}

fn write_number(out: &mut String, value: &Value) -> bool {
    match value {
        Value::Float32(Some(v)) => write_float!(out, *v),
        Value::Float64(Some(v)) => write_float!(out, *v),
        Value::Decimal(Some(v)) => {
            let _ = write!(out, "{}", v);
        }
        v => return write_integer(out, v),
    }
    true
}

fn write_sequence(
    out: &mut String,
    delimiters: (char, char),
    element: &CqlType,
    value: &Value,
) -> bool {
    let Some(values) = value.sequence() else {
        return false;
    };
    out.push(delimiters.0);
    for (i, v) in values.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if !write_as(out, element, v) {
            return false;
        }
    }
    out.push(delimiters.1);
    true
}

/// Write `value` as a literal of `cql_type`, false when it does not fit.
fn write_as(out: &mut String, cql_type: &CqlType, value: &Value) -> bool {
    if value.is_null() {
        out.push_str("null");
        return true;
    }
    match (cql_type, value) {
        (CqlType::Frozen(inner), v) => return write_as(out, inner, v),
        (CqlType::Boolean, Value::Boolean(Some(v))) => {
            out.push_str(if *v { "true" } else { "false" })
        }
        (
            CqlType::Tinyint
            | CqlType::Smallint
            | CqlType::Int
            | CqlType::Bigint
            | CqlType::Varint
            | CqlType::Counter,
            v,
        ) => return write_integer(out, v),
        (CqlType::Float | CqlType::Double | CqlType::Decimal, v) => return write_number(out, v),
        (CqlType::Ascii | CqlType::Text | CqlType::Inet, Value::Varchar(Some(v))) => {
            write_string(out, v)
        }
        (CqlType::Blob, Value::Blob(Some(v))) => {
            out.push_str("0x");
            out.push_str(&hex::encode(v));
        }
        (CqlType::Date, Value::Date(Some(v))) => {
            let _ = write!(out, "'{}'", date_text(v));
        }
        (CqlType::Time, Value::Time(Some(v))) => {
            let _ = write!(out, "'{}'", time_text(v));
        }
        (CqlType::Timestamp, Value::Timestamp(Some(v))) => write_timestamp(out, &v.assume_utc()),
        (CqlType::Timestamp, Value::TimestampWithTimezone(Some(v))) => write_timestamp(out, v),
        (CqlType::Uuid | CqlType::Timeuuid, Value::Uuid(Some(v))) => {
            let _ = write!(out, "{}", v);
        }
        (CqlType::List(element), v) => return write_sequence(out, ('[', ']'), element, v),
        (CqlType::Set(element), v) => return write_sequence(out, ('{', '}'), element, v),
        (CqlType::Tuple(types), Value::List(Some(v), ..)) if v.len() == types.len() => {
            out.push('(');
            for (i, (t, v)) in types.iter().zip(v).enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if !write_as(out, t, v) {
                    return false;
                }
            }
            out.push(')');
        }
        (CqlType::Map(key, element), Value::Map(Some(v), ..)) => {
            out.push('{');
            for (i, (k, v)) in v.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if !write_as(out, key, k) {
                    return false;
                }
                out.push_str(": ");
                if !write_as(out, element, v) {
                    return false;
                }
            }
            out.push('}');
        }
        (CqlType::Udt(..), Value::Map(Some(v), ..)) => {
            out.push('{');
            for (i, (k, v)) in v.iter().enumerate() {
                let Value::Varchar(Some(k)) = k else {
                    return false;
                };
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&quote_identifier(k));
                out.push_str(": ");
                out.push_str(coerce(&CqlRegistry, v).as_str());
            }
            out.push('}');
        }
        _ => return false,
    }
    true
}
