// Serde support: a Size is written as its display string and read back
// through the parser. Integers are accepted on input as Metric byte counts.

use crate::size::Size;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;

impl Serialize for Size {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct SizeVisitor;

impl<'de> Visitor<'de> for SizeVisitor {
    type Value = Size;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a byte quantity such as \"1.5 GiB\" or an integer byte count")
    }

    fn visit_str<E>(self, value: &str) -> Result<Size, E>
    where
        E: de::Error,
    {
        Size::parse(value).map_err(E::custom)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Size, E>
    where
        E: de::Error,
    {
        Ok(Size::from(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Size, E>
    where
        E: de::Error,
    {
        i64::try_from(value)
            .map(Size::from)
            .map_err(|_| E::custom(format!("{} bytes exceeds 64 bits", value)))
    }
}

impl<'de> Deserialize<'de> for Size {
    fn deserialize<D>(deserializer: D) -> Result<Size, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SizeVisitor)
    }
}
