use crate::normalize::detector::looks_like_size;
use crate::size::{ParseOptions, Size};
use log::{debug, warn};
use std::fmt;
use toml::{map::Map, Value};

#[derive(Debug)]
pub enum NormalizeError {
    Toml(toml::de::Error),
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::Toml(e) => write!(f, "Invalid TOML document: {}", e),
        }
    }
}

impl std::error::Error for NormalizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NormalizeError::Toml(e) => Some(e),
        }
    }
}

impl From<toml::de::Error> for NormalizeError {
    fn from(e: toml::de::Error) -> Self {
        NormalizeError::Toml(e)
    }
}

/// Rewrites byte quantities found in TOML values to exact byte counts
#[derive(Debug, Clone, Default)]
pub struct SizeProcessor {
    options: ParseOptions,
}

impl SizeProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse a TOML document and normalize every size string in it
    pub fn process_document(&self, content: &str) -> Result<Value, NormalizeError> {
        let table: Map<String, Value> = toml::from_str(content)?;
        Ok(self.process_value(&Value::Table(table)))
    }

    /// Returns a new Value with sizes replaced by integers.
    /// Inside tables the original text is kept under `_<key>_original`.
    pub fn process_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => match self.parse_size(s) {
                Some(size) => Value::Integer(size.bytes()),
                None => value.clone(),
            },
            Value::Array(arr) => Value::Array(arr.iter().map(|v| self.process_value(v)).collect()),
            Value::Table(table) => {
                let mut processed = Map::new();
                for (key, val) in table {
                    let processed_val = self.process_value(val);

                    // If we converted a size string, also store the original
                    if let (Value::String(s), Value::Integer(_)) = (val, &processed_val) {
                        let original_key = format!("_{}_original", key);
                        processed.insert(original_key, Value::String(s.clone()));
                    }
                    processed.insert(key.clone(), processed_val);
                }
                Value::Table(processed)
            }
            _ => value.clone(),
        }
    }

    fn parse_size(&self, s: &str) -> Option<Size> {
        if !looks_like_size(s) {
            return None;
        }

        match Size::parse_with(s.trim(), &self.options) {
            Ok(size) => {
                debug!("normalized {:?} to {} bytes", s, size.bytes());
                Some(size)
            }
            Err(e) => {
                // Looked like a size but isn't one, keep the original string
                warn!("Failed to parse size string '{}': {}", s, e);
                None
            }
        }
    }
}
