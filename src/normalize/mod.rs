pub mod detector;
pub mod processor;

pub use detector::looks_like_size;
pub use processor::{NormalizeError, SizeProcessor};
