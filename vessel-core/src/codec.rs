use crate::Value;
use std::{collections::BTreeMap, fmt::Write};
use time::{Date, OffsetDateTime, Time};

/// Converts a [`Value`] into a backend literal.
pub trait Encoder {
    type Literal;
    fn encode(&self, value: &Value) -> Self::Literal;
}

/// Registry of the encoders a backend knows about.
pub trait CodecRegistry {
    type Encoder: Encoder;

    /// The encoder specialized for the runtime kind of `value`, if the backend has one.
    fn resolve(&self, value: &Value) -> Option<Self::Encoder>;

    /// Wrap a normalized value. It must accept every shape produced by [`normalize`].
    fn generic(&self, value: &Value) -> Literal<Self>;
}

pub type Literal<R> = <<R as CodecRegistry>::Encoder as Encoder>::Literal;

/// Encode `value` with the specialized encoder or, when there is none, with the generic one
/// after normalization. This never fails.
pub fn coerce<R: CodecRegistry + ?Sized>(registry: &R, value: &Value) -> Literal<R> {
    match registry.resolve(value) {
        Some(encoder) => encoder.encode(value),
        None => {
            log::trace!(
                "No encoder registered for {:?}, falling back to the generic shape",
                value
            );
            registry.generic(&normalize(value))
        }
    }
}

/// Reduce any value to the primitive shapes every backend understands:
/// `Null`, `Boolean`, `Int64`, `Float64`, `Varchar`, `List` and `Map` with `Varchar` keys.
pub fn normalize(value: &Value) -> Value {
    macro_rules! integer {
        ($v:expr) => {
            match i64::try_from(*$v) {
                Ok(v) => Value::Int64(Some(v)),
                Err(..) => Value::Varchar(Some($v.to_string())),
            }
        };
    }
    match value {
        v if v.is_null() => Value::Null,
        Value::Boolean(v) => Value::Boolean(*v),
        Value::Int8(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::Int16(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::Int32(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::Int64(Some(v)) => Value::Int64(Some(*v)),
        Value::Int128(Some(v)) => integer!(v),
        Value::UInt8(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::UInt16(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::UInt32(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::UInt64(Some(v)) => integer!(v),
        Value::UInt128(Some(v)) => integer!(v),
        Value::Float32(Some(v)) => float(*v as f64),
        Value::Float64(Some(v)) => float(*v),
        Value::Decimal(Some(v)) => Value::Varchar(Some(v.to_string())),
        Value::Varchar(Some(v)) => Value::Varchar(Some(v.clone())),
        Value::Blob(Some(v)) => Value::Varchar(Some(hex::encode(v))),
        Value::Date(Some(v)) => Value::Varchar(Some(date_text(v))),
        Value::Time(Some(v)) => Value::Varchar(Some(time_text(v))),
        Value::Timestamp(Some(v)) => {
            let mut out = date_text(&v.date());
            out.push('T');
            out.push_str(&time_text(&v.time()));
            Value::Varchar(Some(out))
        }
        Value::TimestampWithTimezone(Some(v)) => Value::Varchar(Some(timestamptz_text(v))),
        Value::Uuid(Some(v)) => Value::Varchar(Some(v.to_string())),
        Value::List(Some(..), ..) | Value::Set(Some(..), ..) => Value::List(
            Some(value.sequence().into_iter().flatten().map(normalize).collect()),
            Box::new(Value::Null),
        ),
        Value::Map(Some(v), ..) => Value::Map(
            Some(
                v.iter()
                    .map(|(k, v)| (Value::Varchar(Some(text(&normalize(k)))), normalize(v)))
                    .collect::<BTreeMap<_, _>>(),
            ),
            Box::new(Value::Varchar(None)),
            Box::new(Value::Null),
        ),
        _ => Value::Null,
    }
}

fn float(value: f64) -> Value {
    if value.is_finite() {
        Value::Float64(Some(value))
    } else {
        Value::Varchar(Some(value.to_string()))
    }
}

/// Textual form of a normalized value, used for map keys.
fn text(value: &Value) -> String {
    match value {
        Value::Varchar(Some(v)) => v.clone(),
        Value::Boolean(Some(v)) => v.to_string(),
        Value::Int64(Some(v)) => v.to_string(),
        Value::Float64(Some(v)) => v.to_string(),
        v if v.is_null() => "null".into(),
        v => format!("{:?}", v),
    }
}

pub fn date_text(value: &Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        value.year(),
        value.month() as u8,
        value.day()
    )
}

pub fn time_text(value: &Time) -> String {
    let mut out = format!(
        "{:02}:{:02}:{:02}",
        value.hour(),
        value.minute(),
        value.second()
    );
    let mut subsecond = value.nanosecond();
    if subsecond != 0 {
        let mut width = 9;
        while subsecond % 10 == 0 {
            subsecond /= 10;
            width -= 1;
        }
        let _ = write!(out, ".{:0width$}", subsecond);
    }
    out
}

pub fn timestamptz_text(value: &OffsetDateTime) -> String {
    let mut out = date_text(&value.date());
    out.push('T');
    out.push_str(&time_text(&value.time()));
    let offset = value.offset();
    let _ = write!(
        out,
        "{}{:02}:{:02}",
        if offset.is_negative() { '-' } else { '+' },
        offset.whole_hours().unsigned_abs(),
        offset.minutes_past_hour().unsigned_abs()
    );
    out
}
