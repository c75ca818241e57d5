use std::fmt;

/// Unit suffix not present in the unit table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitError {
    suffix: String,
}

impl UnitError {
    pub fn new(suffix: &str) -> Self {
        Self {
            suffix: suffix.to_string(),
        }
    }

    /// The offending suffix text, as written by the caller
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not a valid byte quantity", self.suffix)
    }
}

impl std::error::Error for UnitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    EmptyInput,
    MalformedNumber,
    InvalidUnit(UnitError),
    Overflow,
    NegativeNotAllowed,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::EmptyInput => write!(f, "empty string"),
            ParseErrorKind::MalformedNumber => write!(f, "must start with a number"),
            ParseErrorKind::InvalidUnit(e) => write!(f, "{}", e),
            ParseErrorKind::Overflow => write!(f, "value exceeds 64 bits"),
            ParseErrorKind::NegativeNotAllowed => write!(f, "negative sizes are not allowed"),
        }
    }
}

/// Failure to convert text into a [`Size`](crate::size::Size).
/// Always carries the full input for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    input: String,
    kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "can't convert {:?} to size: {}", self.input, self.kind)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidUnit(e) => Some(e),
            _ => None,
        }
    }
}
