// Byte quantities: the unit table, the text codec and the Size value type

pub mod error;
pub mod formatter;
pub mod ops;
pub mod parser;
pub mod types;
pub mod unit;


pub use error::{ParseError, ParseErrorKind, UnitError};
pub use formatter::format_bytes;
pub use parser::ParseOptions;
pub use types::Size;
pub use unit::{resolve_suffix, suffix_for, Base, Unit, MAX_EXPONENT};
