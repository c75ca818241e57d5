// Glue between Size and the outside world: serde text codec and loosely
// typed stored values

pub mod text;
pub mod value;

pub use value::{RawValue, ScanError};
