//! Widget naming.

use std::{fmt, str::FromStr};

use convert_case::{Case, Casing};

use crate::error::{Error, Result};

/// A lookup name for a widget: lowercase ASCII letters, digits, and
/// underscores, never empty. Every widget carries one, derived from its
/// type by default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetName(String);

impl WidgetName {
    /// Derive a name from an arbitrary string. The input is snake cased,
    /// anything that still doesn't fit is dropped, and a string with
    /// nothing usable left falls back to "widget".
    pub fn convert(raw: &str) -> Self {
        let snake: String = raw
            .to_case(Case::Snake)
            .chars()
            .filter(|c| Self::permitted(*c))
            .collect();
        if snake.is_empty() {
            WidgetName("widget".into())
        } else {
            WidgetName(snake)
        }
    }

    /// View the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn permitted(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }
}

impl FromStr for WidgetName {
    type Err = Error;

    /// Strict parse: rejects anything `convert` would have to alter.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.chars().all(WidgetName::permitted) {
            return Err(Error::Invalid(s.into()));
        }
        Ok(WidgetName(s.into()))
    }
}

impl TryFrom<&str> for WidgetName {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for WidgetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for WidgetName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for WidgetName {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}
