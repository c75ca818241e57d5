pub mod adapter;
pub mod config;
pub mod normalize;
pub mod size;

pub use size::{Base, ParseError, ParseErrorKind, ParseOptions, Size, Unit};

#[cfg(target_arch = "wasm32")]
pub mod wasm;
