use std::result::Result as StdResult;

use thiserror::Error;

use crate::WidgetId;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Parse error marker type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
#[error("{message}")]
pub struct ParseError {
    /// Parse error message, optionally including location.
    message: String,
}

impl ParseError {
    /// Construct a parse error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Construct a parse error with optional line/offset information.
    pub fn with_position(
        message: impl Into<String>,
        line: Option<usize>,
        offset: Option<usize>,
    ) -> Self {
        let message = message.into();
        let message = match (line, offset) {
            (Some(line), Some(offset)) => format!("{message} (line {line}, offset {offset})"),
            (Some(line), None) => format!("{message} (line {line})"),
            (None, Some(offset)) => format!("{message} (offset {offset})"),
            (None, None) => message,
        };
        Self { message }
    }
}

/// Core error type.
#[derive(PartialEq, Error, Debug, Clone)]
pub enum Error {
    /// A widget id was stale or belongs to no live widget.
    #[error("invalid widget id {0:?}")]
    InvalidNode(WidgetId),

    /// A sibling insert was attempted on a widget with no parent.
    #[error("cannot insert a sibling on a root widget")]
    RootSibling,

    /// A structural operation was invalid in the current tree state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Attaching the widget would make it its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Intended parent.
        parent: WidgetId,
        /// Widget being attached.
        child: WidgetId,
    },

    /// A required lookup found no matching widget.
    #[error("widget not found: {0}")]
    WidgetNotFound(String),

    /// A resource could not be loaded by the collaborator.
    #[error("failed to load {path}: {reason}")]
    Resource {
        /// Resource URL or path.
        path: String,
        /// Underlying reason.
        reason: String,
    },

    /// Parsing failure.
    #[error("parse error: {0}")]
    Parse(#[source] ParseError),

    /// Invalid input error.
    #[error("invalid: {0}")]
    Invalid(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        match e {
            geom::Error::Parse(s) => Self::Parse(ParseError::new(s)),
            geom::Error::Geometry(s) => Self::Invalid(s),
        }
    }
}
