use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use vessel_core::{Error, Result};

/// Type codes of the native protocol.
pub mod protocol {
    pub const CUSTOM: u16 = 0x0000;
    pub const ASCII: u16 = 0x0001;
    pub const BIGINT: u16 = 0x0002;
    pub const BLOB: u16 = 0x0003;
    pub const BOOLEAN: u16 = 0x0004;
    pub const COUNTER: u16 = 0x0005;
    pub const DECIMAL: u16 = 0x0006;
    pub const DOUBLE: u16 = 0x0007;
    pub const FLOAT: u16 = 0x0008;
    pub const INT: u16 = 0x0009;
    pub const TIMESTAMP: u16 = 0x000B;
    pub const UUID: u16 = 0x000C;
    pub const VARCHAR: u16 = 0x000D;
    pub const VARINT: u16 = 0x000E;
    pub const TIMEUUID: u16 = 0x000F;
    pub const INET: u16 = 0x0010;
    pub const DATE: u16 = 0x0011;
    pub const TIME: u16 = 0x0012;
    pub const SMALLINT: u16 = 0x0013;
    pub const TINYINT: u16 = 0x0014;
    pub const DURATION: u16 = 0x0015;
    pub const LIST: u16 = 0x0020;
    pub const MAP: u16 = 0x0021;
    pub const SET: u16 = 0x0022;
    pub const UDT: u16 = 0x0030;
    pub const TUPLE: u16 = 0x0031;
}

/// Declared type of a column or of a user type field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CqlType {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Duration,
    Float,
    Inet,
    Int,
    Smallint,
    Text,
    Time,
    Timestamp,
    Timeuuid,
    Tinyint,
    Uuid,
    Varint,
    List(Box<CqlType>),
    Set(Box<CqlType>),
    Map(Box<CqlType>, Box<CqlType>),
    Tuple(Vec<CqlType>),
    Frozen(Box<CqlType>),
    /// User defined type, by name.
    Udt(String),
    Custom(String),
}

impl CqlType {
    pub fn parse(value: &str) -> Result<CqlType> {
        value.parse()
    }

    pub fn protocol_code(&self) -> u16 {
        match self {
            CqlType::Ascii => protocol::ASCII,
            CqlType::Bigint => protocol::BIGINT,
            CqlType::Blob => protocol::BLOB,
            CqlType::Boolean => protocol::BOOLEAN,
            CqlType::Counter => protocol::COUNTER,
            CqlType::Date => protocol::DATE,
            CqlType::Decimal => protocol::DECIMAL,
            CqlType::Double => protocol::DOUBLE,
            CqlType::Duration => protocol::DURATION,
            CqlType::Float => protocol::FLOAT,
            CqlType::Inet => protocol::INET,
            CqlType::Int => protocol::INT,
            CqlType::Smallint => protocol::SMALLINT,
            CqlType::Text => protocol::VARCHAR,
            CqlType::Time => protocol::TIME,
            CqlType::Timestamp => protocol::TIMESTAMP,
            CqlType::Timeuuid => protocol::TIMEUUID,
            CqlType::Tinyint => protocol::TINYINT,
            CqlType::Uuid => protocol::UUID,
            CqlType::Varint => protocol::VARINT,
            CqlType::List(..) => protocol::LIST,
            CqlType::Set(..) => protocol::SET,
            CqlType::Map(..) => protocol::MAP,
            CqlType::Tuple(..) => protocol::TUPLE,
            CqlType::Frozen(inner) => inner.protocol_code(),
            CqlType::Udt(..) => protocol::UDT,
            CqlType::Custom(..) => protocol::CUSTOM,
        }
    }

    /// The type without any `frozen<..>` wrapper.
    pub fn unfrozen(&self) -> &CqlType {
        match self {
            CqlType::Frozen(inner) => inner.unfrozen(),
            v => v,
        }
    }
}

impl Display for CqlType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CqlType::Ascii => f.write_str("ascii"),
            CqlType::Bigint => f.write_str("bigint"),
            CqlType::Blob => f.write_str("blob"),
            CqlType::Boolean => f.write_str("boolean"),
            CqlType::Counter => f.write_str("counter"),
            CqlType::Date => f.write_str("date"),
            CqlType::Decimal => f.write_str("decimal"),
            CqlType::Double => f.write_str("double"),
            CqlType::Duration => f.write_str("duration"),
            CqlType::Float => f.write_str("float"),
            CqlType::Inet => f.write_str("inet"),
            CqlType::Int => f.write_str("int"),
            CqlType::Smallint => f.write_str("smallint"),
            CqlType::Text => f.write_str("text"),
            CqlType::Time => f.write_str("time"),
            CqlType::Timestamp => f.write_str("timestamp"),
            CqlType::Timeuuid => f.write_str("timeuuid"),
            CqlType::Tinyint => f.write_str("tinyint"),
            CqlType::Uuid => f.write_str("uuid"),
            CqlType::Varint => f.write_str("varint"),
            CqlType::List(inner) => write!(f, "list<{}>", inner),
            CqlType::Set(inner) => write!(f, "set<{}>", inner),
            CqlType::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            CqlType::Tuple(types) => {
                f.write_str("tuple<")?;
                for (i, t) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", t)?;
                }
                f.write_str(">")
            }
            CqlType::Frozen(inner) => write!(f, "frozen<{}>", inner),
            CqlType::Udt(name) => f.write_str(name),
            CqlType::Custom(class) => write!(f, "'{}'", class),
        }
    }
}

impl FromStr for CqlType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let mut input = value;
        let result = parse_type(&mut input)?;
        if !input.trim().is_empty() {
            return Err(Error::msg(format!(
                "Unexpected `{}` after the type in `{}`",
                input.trim(),
                value
            )));
        }
        Ok(result)
    }
}

fn skip_whitespace(input: &mut &str) {
    *input = input.trim_start();
}

fn parse_name<'s>(input: &mut &'s str) -> Result<(String, bool)> {
    skip_whitespace(input);
    if let Some(rest) = input.strip_prefix('"') {
        let mut name = String::new();
        let mut chars = rest.char_indices();
        while let Some((i, c)) = chars.next() {
            if c == '"' {
                if rest[i + 1..].starts_with('"') {
                    name.push('"');
                    chars.next();
                } else {
                    *input = &rest[i + 1..];
                    return Ok((name, true));
                }
            } else {
                name.push(c);
            }
        }
        return Err(Error::msg(format!("Unterminated quoted name in `{}`", input)));
    }
    if let Some(rest) = input.strip_prefix('\'') {
        let Some(end) = rest.find('\'') else {
            return Err(Error::msg(format!("Unterminated custom type in `{}`", input)));
        };
        let name = rest[..end].to_string();
        *input = &rest[end + 1..];
        return Ok((name, true));
    }
    let len = input
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
        .unwrap_or(input.len());
    if len == 0 {
        return Err(Error::msg(format!("Expected a type name in `{}`", input)));
    }
    let name = input[..len].to_lowercase();
    *input = &input[len..];
    Ok((name, false))
}

fn parse_arguments(input: &mut &str) -> Result<Vec<CqlType>> {
    skip_whitespace(input);
    let mut result = Vec::new();
    let Some(rest) = input.strip_prefix('<') else {
        return Ok(result);
    };
    *input = rest;
    loop {
        result.push(parse_type(input)?);
        skip_whitespace(input);
        if let Some(rest) = input.strip_prefix(',') {
            *input = rest;
        } else if let Some(rest) = input.strip_prefix('>') {
            *input = rest;
            return Ok(result);
        } else {
            return Err(Error::msg(format!("Expected `,` or `>` in `{}`", input)));
        }
    }
}

fn parse_type(input: &mut &str) -> Result<CqlType> {
    skip_whitespace(input);
    let custom = input.starts_with('\'');
    let (name, quoted) = parse_name(input)?;
    if custom {
        return Ok(CqlType::Custom(name));
    }
    if quoted {
        return Ok(CqlType::Udt(name));
    }
    let mut arguments = parse_arguments(input)?;
    macro_rules! arity {
        ($n:expr) => {
            if arguments.len() != $n {
                return Err(Error::msg(format!(
                    "The type `{}` expects {} type arguments, found {}",
                    name,
                    $n,
                    arguments.len()
                )));
            }
        };
    }
    let result = match name.as_str() {
        "list" | "set" | "frozen" => {
            arity!(1);
            let inner = Box::new(arguments.remove(0));
            match name.as_str() {
                "list" => CqlType::List(inner),
                "set" => CqlType::Set(inner),
                _ => CqlType::Frozen(inner),
            }
        }
        "map" => {
            arity!(2);
            let value = Box::new(arguments.remove(1));
            let key = Box::new(arguments.remove(0));
            CqlType::Map(key, value)
        }
        "tuple" => {
            if arguments.is_empty() {
                return Err(Error::msg("The type `tuple` expects type arguments"));
            }
            CqlType::Tuple(arguments)
        }
        _ => {
            arity!(0);
            match name.as_str() {
                "ascii" => CqlType::Ascii,
                "bigint" => CqlType::Bigint,
                "blob" => CqlType::Blob,
                "boolean" => CqlType::Boolean,
                "counter" => CqlType::Counter,
                "date" => CqlType::Date,
                "decimal" => CqlType::Decimal,
                "double" => CqlType::Double,
                "duration" => CqlType::Duration,
                "float" => CqlType::Float,
                "inet" => CqlType::Inet,
                "int" => CqlType::Int,
                "smallint" => CqlType::Smallint,
                "text" | "varchar" => CqlType::Text,
                "time" => CqlType::Time,
                "timestamp" => CqlType::Timestamp,
                "timeuuid" => CqlType::Timeuuid,
                "tinyint" => CqlType::Tinyint,
                "uuid" => CqlType::Uuid,
                "varint" => CqlType::Varint,
                // A keyspace qualified user type keeps only its name.
                _ => CqlType::Udt(name.rsplit('.').next().unwrap_or(&name).to_string()),
            }
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested() {
        let t = CqlType::parse("frozen<list<frozen<address>>>").unwrap();
        assert_eq!(
            t,
            CqlType::Frozen(Box::new(CqlType::List(Box::new(CqlType::Frozen(
                Box::new(CqlType::Udt("address".into()))
            )))))
        );
        assert_eq!(t.protocol_code(), protocol::LIST);
        assert_eq!(t.to_string(), "frozen<list<frozen<address>>>");
    }

    #[test]
    fn parse_map_and_quoted() {
        let t = CqlType::parse(" map < TEXT , \"Point\" > ").unwrap();
        assert_eq!(
            t,
            CqlType::Map(
                Box::new(CqlType::Text),
                Box::new(CqlType::Udt("Point".into()))
            )
        );
        assert_eq!(
            CqlType::parse("set<ks.phone>").unwrap().unfrozen(),
            &CqlType::Set(Box::new(CqlType::Udt("phone".into())))
        );
    }

    #[test]
    fn parse_errors() {
        assert!(CqlType::parse("list<int").is_err());
        assert!(CqlType::parse("map<int>").is_err());
        assert!(CqlType::parse("int extra").is_err());
        assert!(CqlType::parse("").is_err());
    }
}
