use crate::EitherIterator;
use rust_decimal::Decimal;
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet, btree_set},
    slice,
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Backend-neutral value.
///
/// Scalars carry an `Option` so that a typed null (`Int32(None)`) keeps the
/// information about the expected type. Collections carry the prototype of
/// their elements in the trailing boxes.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Int128(Option<i128>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    UInt128(Option<u128>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
    List(Option<Vec<Value>>, /* type: */ Box<Value>),
    Set(Option<BTreeSet<Value>>, /* type: */ Box<Value>),
    Map(
        Option<BTreeMap<Value, Value>>,
        /* key: */ Box<Value>,
        /* value: */ Box<Value>,
    ),
}

macro_rules! cmp_float {
    ($l:expr, $r:expr) => {
        match ($l, $r) {
            (Some(l), Some(r)) => l.total_cmp(r),
            (l, r) => l.is_some().cmp(&r.is_some()),
        }
    };
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(..) => 1,
            Value::Int8(..) => 2,
            Value::Int16(..) => 3,
            Value::Int32(..) => 4,
            Value::Int64(..) => 5,
            Value::Int128(..) => 6,
            Value::UInt8(..) => 7,
            Value::UInt16(..) => 8,
            Value::UInt32(..) => 9,
            Value::UInt64(..) => 10,
            Value::UInt128(..) => 11,
            Value::Float32(..) => 12,
            Value::Float64(..) => 13,
            Value::Decimal(..) => 14,
            Value::Varchar(..) => 15,
            Value::Blob(..) => 16,
            Value::Date(..) => 17,
            Value::Time(..) => 18,
            Value::Timestamp(..) => 19,
            Value::TimestampWithTimezone(..) => 20,
            Value::Uuid(..) => 21,
            Value::List(..) => 22,
            Value::Set(..) => 23,
            Value::Map(..) => 24,
        }
    }

    /// True for `Null` and for every typed null.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null
            | Value::Boolean(None)
            | Value::Int8(None)
            | Value::Int16(None)
            | Value::Int32(None)
            | Value::Int64(None)
            | Value::Int128(None)
            | Value::UInt8(None)
            | Value::UInt16(None)
            | Value::UInt32(None)
            | Value::UInt64(None)
            | Value::UInt128(None)
            | Value::Float32(None)
            | Value::Float64(None)
            | Value::Decimal(None)
            | Value::Varchar(None)
            | Value::Blob(None)
            | Value::Date(None)
            | Value::Time(None)
            | Value::Timestamp(None)
            | Value::TimestampWithTimezone(None)
            | Value::Uuid(None)
            | Value::List(None, ..)
            | Value::Set(None, ..)
            | Value::Map(None, ..) => true,
            _ => false,
        }
    }

    pub fn same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(.., l), Self::List(.., r)) | (Self::Set(.., l), Self::Set(.., r)) => {
                l.same_type(r)
            }
            (Self::Map(.., l_key, l_value), Self::Map(.., r_key, r_value)) => {
                l_key.same_type(r_key) && l_value.same_type(r_value)
            }
            _ => self.rank() == other.rank(),
        }
    }

    /// The elements of a `List` or `Set`, in iteration order. Anything else is not a sequence.
    pub fn sequence(
        &self,
    ) -> Option<EitherIterator<slice::Iter<'_, Value>, btree_set::Iter<'_, Value>>> {
        match self {
            Value::List(Some(v), ..) => Some(EitherIterator::Left(v.iter())),
            Value::Set(Some(v), ..) => Some(EitherIterator::Right(v.iter())),
            _ => None,
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l.cmp(r),
            (Self::Int8(l), Self::Int8(r)) => l.cmp(r),
            (Self::Int16(l), Self::Int16(r)) => l.cmp(r),
            (Self::Int32(l), Self::Int32(r)) => l.cmp(r),
            (Self::Int64(l), Self::Int64(r)) => l.cmp(r),
            (Self::Int128(l), Self::Int128(r)) => l.cmp(r),
            (Self::UInt8(l), Self::UInt8(r)) => l.cmp(r),
            (Self::UInt16(l), Self::UInt16(r)) => l.cmp(r),
            (Self::UInt32(l), Self::UInt32(r)) => l.cmp(r),
            (Self::UInt64(l), Self::UInt64(r)) => l.cmp(r),
            (Self::UInt128(l), Self::UInt128(r)) => l.cmp(r),
            (Self::Float32(l), Self::Float32(r)) => cmp_float!(l, r),
            (Self::Float64(l), Self::Float64(r)) => cmp_float!(l, r),
            (Self::Decimal(l), Self::Decimal(r)) => l.cmp(r),
            (Self::Varchar(l), Self::Varchar(r)) => l.cmp(r),
            (Self::Blob(l), Self::Blob(r)) => l.cmp(r),
            (Self::Date(l), Self::Date(r)) => l.cmp(r),
            (Self::Time(l), Self::Time(r)) => l.cmp(r),
            (Self::Timestamp(l), Self::Timestamp(r)) => l.cmp(r),
            (Self::TimestampWithTimezone(l), Self::TimestampWithTimezone(r)) => l.cmp(r),
            (Self::Uuid(l), Self::Uuid(r)) => l.cmp(r),
            (Self::List(l, l_type), Self::List(r, r_type)) => {
                l.cmp(r).then_with(|| l_type.cmp(r_type))
            }
            (Self::Set(l, l_type), Self::Set(r, r_type)) => {
                l.cmp(r).then_with(|| l_type.cmp(r_type))
            }
            (Self::Map(l, l_key, l_value), Self::Map(r, r_key, r_value)) => l
                .cmp(r)
                .then_with(|| l_key.cmp(r_key))
                .then_with(|| l_value.cmp(r_value)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

/// Conversion of native Rust types into [`Value`].
pub trait AsValue {
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
}

macro_rules! impl_as_value {
    ($source:ty, $into:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $into(None)
            }
            fn as_value(self) -> Value {
                $into(Some(self.into()))
            }
        }
    };
}

impl_as_value!(bool, Value::Boolean);
impl_as_value!(i8, Value::Int8);
impl_as_value!(i16, Value::Int16);
impl_as_value!(i32, Value::Int32);
impl_as_value!(i64, Value::Int64);
impl_as_value!(i128, Value::Int128);
impl_as_value!(u8, Value::UInt8);
impl_as_value!(u16, Value::UInt16);
impl_as_value!(u32, Value::UInt32);
impl_as_value!(u64, Value::UInt64);
impl_as_value!(u128, Value::UInt128);
impl_as_value!(f32, Value::Float32);
impl_as_value!(f64, Value::Float64);
impl_as_value!(Decimal, Value::Decimal);
impl_as_value!(String, Value::Varchar);
impl_as_value!(&str, Value::Varchar);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(PrimitiveDateTime, Value::Timestamp);
impl_as_value!(OffsetDateTime, Value::TimestampWithTimezone);
impl_as_value!(Uuid, Value::Uuid);

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_empty_value() -> Value {
        Value::List(None, Box::new(T::as_empty_value()))
    }
    fn as_value(self) -> Value {
        Value::List(
            Some(self.into_iter().map(AsValue::as_value).collect()),
            Box::new(T::as_empty_value()),
        )
    }
}

impl<T: AsValue> AsValue for BTreeSet<T> {
    fn as_empty_value() -> Value {
        Value::Set(None, Box::new(T::as_empty_value()))
    }
    fn as_value(self) -> Value {
        Value::Set(
            Some(self.into_iter().map(AsValue::as_value).collect()),
            Box::new(T::as_empty_value()),
        )
    }
}

impl<K: AsValue, V: AsValue> AsValue for BTreeMap<K, V> {
    fn as_empty_value() -> Value {
        Value::Map(
            None,
            Box::new(K::as_empty_value()),
            Box::new(V::as_empty_value()),
        )
    }
    fn as_value(self) -> Value {
        Value::Map(
            Some(
                self.into_iter()
                    .map(|(k, v)| (k.as_value(), v.as_value()))
                    .collect(),
            ),
            Box::new(K::as_empty_value()),
            Box::new(V::as_empty_value()),
        )
    }
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}
