use crate::size::{Base, ParseOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Parsing rules
    #[serde(default)]
    pub parse: ParseOptions,

    // Output defaults for the format command
    #[serde(default)]
    pub format: FormatConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormatConfig {
    // Fractional digits; absent means shortest round-trip form
    #[serde(default)]
    pub precision: Option<usize>,

    #[serde(default)]
    pub binary: bool,

    // Largest exactly dividing unit instead of auto scaling
    #[serde(default)]
    pub exact: bool,
}

impl FormatConfig {
    pub fn base(&self) -> Base {
        if self.binary {
            Base::Binary
        } else {
            Base::Metric
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
