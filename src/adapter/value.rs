use crate::size::{ParseError, Size};
use std::fmt;

/// A loosely typed value as handed over by a database driver or a
/// structured document
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Bytes(&'a [u8]),
    Text(&'a str),
    Null,
}

impl RawValue<'_> {
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Int64(_) => "int64",
            RawValue::Float64(_) => "float64",
            RawValue::Bool(_) => "bool",
            RawValue::Bytes(_) => "bytes",
            RawValue::Text(_) => "text",
            RawValue::Null => "null",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanError {
    TypeMismatch { type_name: String, value: String },
    Parse(ParseError),
}

impl ScanError {
    fn mismatch(type_name: &str, value: impl fmt::Debug) -> Self {
        ScanError::TypeMismatch {
            type_name: type_name.to_string(),
            value: format!("{:?}", value),
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::TypeMismatch { type_name, value } => write!(
                f,
                "could not convert value '{}' of type '{}' to size",
                value, type_name
            ),
            ScanError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Parse(e) => Some(e),
            ScanError::TypeMismatch { .. } => None,
        }
    }
}

impl From<ParseError> for ScanError {
    fn from(e: ParseError) -> Self {
        ScanError::Parse(e)
    }
}

impl Size {
    /// Read a size from a stored value. Integers are Metric byte counts,
    /// text and byte strings go through [`Size::parse`].
    pub fn scan(value: RawValue<'_>) -> Result<Size, ScanError> {
        match value {
            RawValue::Int64(bytes) => Ok(Size::from(bytes)),
            RawValue::Text(text) => Ok(Size::parse(text)?),
            RawValue::Bytes(raw) => Ok(Size::parse(&String::from_utf8_lossy(raw))?),
            other => Err(ScanError::mismatch(other.type_name(), other)),
        }
    }

    /// Value to store: always the display string
    pub fn value(&self) -> String {
        self.to_string()
    }
}

impl TryFrom<&serde_json::Value> for Size {
    type Error = ScanError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::String(s) => Size::scan(RawValue::Text(s)),
            Value::Number(n) => match n.as_i64() {
                Some(bytes) => Size::scan(RawValue::Int64(bytes)),
                None => Err(ScanError::mismatch("number", n)),
            },
            Value::Null => Size::scan(RawValue::Null),
            Value::Bool(b) => Size::scan(RawValue::Bool(*b)),
            Value::Array(_) => Err(ScanError::mismatch("array", value)),
            Value::Object(_) => Err(ScanError::mismatch("object", value)),
        }
    }
}

impl TryFrom<&toml::Value> for Size {
    type Error = ScanError;

    fn try_from(value: &toml::Value) -> Result<Self, Self::Error> {
        use toml::Value;

        match value {
            Value::String(s) => Size::scan(RawValue::Text(s)),
            Value::Integer(i) => Size::scan(RawValue::Int64(*i)),
            Value::Float(f) => Size::scan(RawValue::Float64(*f)),
            Value::Boolean(b) => Size::scan(RawValue::Bool(*b)),
            other => Err(ScanError::mismatch(other.type_str(), other)),
        }
    }
}
