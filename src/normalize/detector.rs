use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex pattern to detect byte quantities
    /// Matches: optional sign, a number with optional fraction, at most one space, a 1-3 letter suffix
    /// Examples: "100 MB", "1.5GiB", "-20 k", ".5 TB"
    static ref SIZE_PATTERN: Regex = Regex::new(
        r"^-?(\d+(\.\d*)?|\.\d+) ?[a-zA-Z]{1,3}$"
    ).unwrap();
}

/// Check if a string looks like a byte quantity with a unit suffix
pub fn looks_like_size(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }

    SIZE_PATTERN.is_match(trimmed)
}
