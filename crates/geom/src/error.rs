/// Errors produced by geometry parsing and operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A geometric operation was invalid.
    Geometry(String),
    /// A textual value could not be parsed.
    Parse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry(s) => write!(f, "{}", s),
            Self::Parse(s) => write!(f, "parse: {}", s),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;
