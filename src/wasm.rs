// WebAssembly bindings for the bytefmt API
use crate::normalize::SizeProcessor;
use crate::size::{Base, Size};
use wasm_bindgen::prelude::*;

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

/// Parse a byte quantity (e.g., "1.25 GiB") into a byte count
#[wasm_bindgen(js_name = parseSize)]
pub fn parse_size(text: &str) -> Result<i64, JsValue> {
    Size::parse(text)
        .map(|size| size.bytes())
        .map_err(|e| js_error(e.to_string()))
}

/// Format a byte count. Without a precision the output is the shortest
/// form that parses back to the same count.
#[wasm_bindgen(js_name = formatSize)]
pub fn format_size(bytes: i64, binary: bool, precision: Option<u32>) -> String {
    let base = if binary { Base::Binary } else { Base::Metric };
    Size::new(bytes, base).format(precision.map(|p| p as usize))
}

/// Normalize byte quantities inside a TOML document
/// Returns JSON string of the normalized document
#[wasm_bindgen(js_name = normalizeToml)]
pub fn normalize_toml(content: &str) -> Result<String, JsValue> {
    let normalized = SizeProcessor::new()
        .process_document(content)
        .map_err(|e| js_error(e.to_string()))?;

    serde_json::to_string(&normalized)
        .map_err(|e| js_error(format!("Failed to serialize document: {}", e)))
}
