//! Scalar values carried by record fields.
//!
//! Every field a [`Record`](crate::Record) exposes is reduced to a [`Value`]
//! tagged with a [`ScalarKind`]. The kind decides two things:
//!
//! - how the value is rendered on the literal path (plain for numbers and
//!   booleans, single-quoted for everything else)
//! - which zero value (if any) makes the field count as absent, see
//!   [`ZeroValues`](crate::ZeroValues)

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Type tag of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    #[serde(rename = "int8", alias = "byte")]
    Int8,
    #[serde(rename = "int16", alias = "short")]
    Int16,
    #[serde(rename = "int32", alias = "int", alias = "integer")]
    Int32,
    #[serde(rename = "int64", alias = "long", alias = "bigint")]
    Int64,
    #[serde(rename = "uint8")]
    UInt8,
    #[serde(rename = "uint16")]
    UInt16,
    #[serde(rename = "uint32")]
    UInt32,
    #[serde(rename = "uint64")]
    UInt64,
    #[serde(rename = "float32", alias = "float")]
    Float32,
    #[serde(rename = "float64", alias = "double")]
    Float64,
    #[serde(rename = "char")]
    Char,
    #[serde(rename = "bool", alias = "boolean")]
    Bool,
    #[serde(rename = "text", alias = "string")]
    Text,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "datetime")]
    DateTime,
    #[serde(rename = "timestamp")]
    Timestamp,
    #[serde(rename = "uuid")]
    Uuid,
}

impl ScalarKind {
    /// All kinds, in declaration order.
    pub const ALL: [ScalarKind; 17] = [
        ScalarKind::Int8,
        ScalarKind::Int16,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::UInt8,
        ScalarKind::UInt16,
        ScalarKind::UInt32,
        ScalarKind::UInt64,
        ScalarKind::Float32,
        ScalarKind::Float64,
        ScalarKind::Char,
        ScalarKind::Bool,
        ScalarKind::Text,
        ScalarKind::Date,
        ScalarKind::DateTime,
        ScalarKind::Timestamp,
        ScalarKind::Uuid,
    ];

    /// Canonical lowercase name (as accepted in config files).
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Int8 => "int8",
            ScalarKind::Int16 => "int16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::UInt8 => "uint8",
            ScalarKind::UInt16 => "uint16",
            ScalarKind::UInt32 => "uint32",
            ScalarKind::UInt64 => "uint64",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Char => "char",
            ScalarKind::Bool => "bool",
            ScalarKind::Text => "text",
            ScalarKind::Date => "date",
            ScalarKind::DateTime => "datetime",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::Uuid => "uuid",
        }
    }

    /// Signed or unsigned integer kinds.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ScalarKind::Int8
                | ScalarKind::Int16
                | ScalarKind::Int32
                | ScalarKind::Int64
                | ScalarKind::UInt8
                | ScalarKind::UInt16
                | ScalarKind::UInt32
                | ScalarKind::UInt64
        )
    }

    /// Integer or floating point kinds.
    pub fn is_numeric(self) -> bool {
        self.is_integer() || matches!(self, ScalarKind::Float32 | ScalarKind::Float64)
    }

    /// Kinds rendered without quotes on the literal path.
    pub fn is_unquoted(self) -> bool {
        self.is_numeric() || self == ScalarKind::Bool
    }

    /// Parse a raw request parameter into a value of this kind.
    pub fn parse_value(self, raw: &str) -> Result<Value, String> {
        Ok(match self {
            ScalarKind::Int8 => Value::Int8(i8::from_param(raw)?),
            ScalarKind::Int16 => Value::Int16(i16::from_param(raw)?),
            ScalarKind::Int32 => Value::Int32(i32::from_param(raw)?),
            ScalarKind::Int64 => Value::Int64(i64::from_param(raw)?),
            ScalarKind::UInt8 => Value::UInt8(u8::from_param(raw)?),
            ScalarKind::UInt16 => Value::UInt16(u16::from_param(raw)?),
            ScalarKind::UInt32 => Value::UInt32(u32::from_param(raw)?),
            ScalarKind::UInt64 => Value::UInt64(u64::from_param(raw)?),
            ScalarKind::Float32 => Value::Float32(f32::from_param(raw)?),
            ScalarKind::Float64 => Value::Float64(f64::from_param(raw)?),
            ScalarKind::Char => Value::Char(char::from_param(raw)?),
            ScalarKind::Bool => Value::Bool(bool::from_param(raw)?),
            ScalarKind::Text => Value::Text(String::from_param(raw)?),
            ScalarKind::Date => Value::Date(NaiveDate::from_param(raw)?),
            ScalarKind::DateTime => Value::DateTime(NaiveDateTime::from_param(raw)?),
            ScalarKind::Timestamp => Value::Timestamp(DateTime::<Utc>::from_param(raw)?),
            ScalarKind::Uuid => Value::Uuid(Uuid::from_param(raw)?),
        })
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "int8" | "byte" => ScalarKind::Int8,
            "int16" | "short" => ScalarKind::Int16,
            "int32" | "int" | "integer" => ScalarKind::Int32,
            "int64" | "long" | "bigint" => ScalarKind::Int64,
            "uint8" => ScalarKind::UInt8,
            "uint16" => ScalarKind::UInt16,
            "uint32" => ScalarKind::UInt32,
            "uint64" => ScalarKind::UInt64,
            "float32" | "float" => ScalarKind::Float32,
            "float64" | "double" => ScalarKind::Float64,
            "char" => ScalarKind::Char,
            "bool" | "boolean" => ScalarKind::Bool,
            "text" | "string" => ScalarKind::Text,
            "date" => ScalarKind::Date,
            "datetime" => ScalarKind::DateTime,
            "timestamp" => ScalarKind::Timestamp,
            "uuid" => ScalarKind::Uuid,
            other => return Err(format!("unknown scalar kind '{other}'")),
        };
        Ok(kind)
    }
}

/// A scalar field value, or null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Char(char),
    Bool(bool),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
}

impl Value {
    /// Kind of a non-null value; `None` for [`Value::Null`].
    pub fn kind(&self) -> Option<ScalarKind> {
        let kind = match self {
            Value::Null => return None,
            Value::Int8(_) => ScalarKind::Int8,
            Value::Int16(_) => ScalarKind::Int16,
            Value::Int32(_) => ScalarKind::Int32,
            Value::Int64(_) => ScalarKind::Int64,
            Value::UInt8(_) => ScalarKind::UInt8,
            Value::UInt16(_) => ScalarKind::UInt16,
            Value::UInt32(_) => ScalarKind::UInt32,
            Value::UInt64(_) => ScalarKind::UInt64,
            Value::Float32(_) => ScalarKind::Float32,
            Value::Float64(_) => ScalarKind::Float64,
            Value::Char(_) => ScalarKind::Char,
            Value::Bool(_) => ScalarKind::Bool,
            Value::Text(_) => ScalarKind::Text,
            Value::Date(_) => ScalarKind::Date,
            Value::DateTime(_) => ScalarKind::DateTime,
            Value::Timestamp(_) => ScalarKind::Timestamp,
            Value::Uuid(_) => ScalarKind::Uuid,
        };
        Some(kind)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render the value as SQL literal text.
    ///
    /// Numbers and booleans are emitted as-is; every other value is wrapped in
    /// single quotes. Floats use Rust's `Display`, so `20.0` renders as `20`
    /// rather than `20.0`. The text is NOT escaped: a `'` inside a string value ends
    /// the literal early. Use the template statements when values come from
    /// untrusted input.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            v if v.kind().is_some_and(ScalarKind::is_unquoted) => v.to_string(),
            v => format!("'{v}'"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Date(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{v}"),
            Value::Uuid(v) => write!(f, "{v}"),
        }
    }
}

/// A Rust type that can back a record field.
///
/// Implemented for the scalar types in [`ScalarKind`] and for `Option<T>` of
/// any of them (`None` maps to [`Value::Null`]).
pub trait ScalarField: Sized {
    /// Type tag of the field.
    const KIND: ScalarKind;

    /// Current value of the field.
    fn to_value(&self) -> Value;

    /// Parse a raw request parameter.
    fn from_param(raw: &str) -> Result<Self, String>;
}

macro_rules! scalar_number {
    ($($t:ty => $kind:ident),+ $(,)?) => {
        $(
            impl ScalarField for $t {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn to_value(&self) -> Value {
                    Value::$kind(*self)
                }

                fn from_param(raw: &str) -> Result<Self, String> {
                    raw.trim().parse::<$t>().map_err(|e| e.to_string())
                }
            }

            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$kind(v)
                }
            }
        )+
    };
}

scalar_number!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
);

impl ScalarField for char {
    const KIND: ScalarKind = ScalarKind::Char;

    fn to_value(&self) -> Value {
        Value::Char(*self)
    }

    fn from_param(raw: &str) -> Result<Self, String> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(format!("expected a single character, got {} chars", raw.chars().count())),
        }
    }
}

impl ScalarField for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_param(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err("expected true/false or 1/0".to_string()),
        }
    }
}

impl ScalarField for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_param(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl ScalarField for NaiveDate {
    const KIND: ScalarKind = ScalarKind::Date;

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_param(raw: &str) -> Result<Self, String> {
        raw.trim().parse::<NaiveDate>().map_err(|e| e.to_string())
    }
}

impl ScalarField for NaiveDateTime {
    const KIND: ScalarKind = ScalarKind::DateTime;

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn from_param(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        raw.parse::<NaiveDateTime>()
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .map_err(|e| e.to_string())
    }
}

impl ScalarField for DateTime<Utc> {
    const KIND: ScalarKind = ScalarKind::Timestamp;

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }

    fn from_param(raw: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| e.to_string())
    }
}

impl ScalarField for Uuid {
    const KIND: ScalarKind = ScalarKind::Uuid;

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }

    fn from_param(raw: &str) -> Result<Self, String> {
        Uuid::parse_str(raw.trim()).map_err(|e| e.to_string())
    }
}

impl<T: ScalarField> ScalarField for Option<T> {
    const KIND: ScalarKind = T::KIND;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    /// An empty parameter clears the field.
    fn from_param(raw: &str) -> Result<Self, String> {
        if raw.is_empty() {
            return Ok(None);
        }
        T::from_param(raw).map(Some)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_booleans_render_unquoted() {
        assert_eq!(Value::Int32(20).to_sql_literal(), "20");
        assert_eq!(Value::Int64(-7).to_sql_literal(), "-7");
        assert_eq!(Value::Float64(1.5).to_sql_literal(), "1.5");
        assert_eq!(Value::Float64(20.0).to_sql_literal(), "20");
        assert_eq!(Value::Bool(false).to_sql_literal(), "false");
    }

    #[test]
    fn other_values_render_quoted() {
        assert_eq!(Value::from("calo").to_sql_literal(), "'calo'");
        assert_eq!(Value::Char('x').to_sql_literal(), "'x'");
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(Value::Date(date).to_sql_literal(), "'2024-03-01'");
    }

    #[test]
    fn string_literal_is_not_escaped() {
        assert_eq!(Value::from("o'neil").to_sql_literal(), "'o'neil'");
    }

    #[test]
    fn option_maps_none_to_null() {
        let none: Option<i32> = None;
        assert_eq!(none.to_value(), Value::Null);
        assert_eq!(Some(5i32).to_value(), Value::Int32(5));
        assert_eq!(<Option<i32> as ScalarField>::KIND, ScalarKind::Int32);
    }

    #[test]
    fn from_param_parses_scalars() {
        assert_eq!(i32::from_param(" 42 "), Ok(42));
        assert!(i32::from_param("4x").is_err());
        assert_eq!(bool::from_param("TRUE"), Ok(true));
        assert_eq!(bool::from_param("0"), Ok(false));
        assert!(bool::from_param("yes").is_err());
        assert_eq!(char::from_param("c"), Ok('c'));
        assert!(char::from_param("cc").is_err());
        assert_eq!(<Option<i64>>::from_param(""), Ok(None));
        assert_eq!(<Option<i64>>::from_param("9"), Ok(Some(9)));
    }

    #[test]
    fn from_param_parses_datetimes() {
        let dt = NaiveDateTime::from_param("2024-03-01 10:20:30").unwrap();
        assert_eq!(dt.to_string(), "2024-03-01 10:20:30");
        let dt = NaiveDateTime::from_param("2024-03-01T10:20:30").unwrap();
        assert_eq!(dt.to_string(), "2024-03-01 10:20:30");
        let ts = DateTime::<Utc>::from_param("2024-03-01T10:20:30+02:00").unwrap();
        assert_eq!(ts.to_string(), "2024-03-01 08:20:30 UTC");
    }

    #[test]
    fn kind_names_round_trip_through_from_str() {
        for kind in ScalarKind::ALL {
            assert_eq!(kind.as_str().parse::<ScalarKind>(), Ok(kind));
        }
        assert_eq!("long".parse::<ScalarKind>(), Ok(ScalarKind::Int64));
        assert!("blob".parse::<ScalarKind>().is_err());
    }

    #[test]
    fn kinds_serialize_by_canonical_name() {
        assert_eq!(
            serde_json::to_value(ScalarKind::DateTime).unwrap(),
            serde_json::json!("datetime")
        );
        let kind: ScalarKind = serde_json::from_value(serde_json::json!("bigint")).unwrap();
        assert_eq!(kind, ScalarKind::Int64);
    }

    #[test]
    fn parse_value_by_kind() {
        assert_eq!(ScalarKind::Int16.parse_value("12"), Ok(Value::Int16(12)));
        assert_eq!(ScalarKind::Text.parse_value("a b"), Ok(Value::from("a b")));
        assert!(ScalarKind::Uuid.parse_value("nope").is_err());
    }
}
