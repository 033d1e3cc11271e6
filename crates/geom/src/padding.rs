use std::{fmt, str::FromStr};

use super::Error;

/// A four-sided inset applied inside a widget's box. Default alignment
/// anchors children against the padded edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    /// Left inset.
    pub left: f32,
    /// Top inset.
    pub top: f32,
    /// Right inset.
    pub right: f32,
    /// Bottom inset.
    pub bottom: f32,
}

impl Padding {
    /// Construct a padding from all four sides.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on every side.
    pub fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// No inset.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Total horizontal inset.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical inset.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.left, self.top, self.right, self.bottom)
    }
}

impl FromStr for Padding {
    type Err = Error;

    /// One value applies to all sides; four values are left/top/right/bottom.
    fn from_str(s: &str) -> Result<Self, Error> {
        match super::parse_units(s)?.as_slice() {
            [v] => Ok(Self::uniform(*v)),
            [l, t, r, b] => Ok(Self::new(*l, *t, *r, *b)),
            other => Err(Error::Parse(format!(
                "expected 1 or 4 values, got {}",
                other.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn parse() -> Result<()> {
        assert_eq!("5".parse::<Padding>()?, Padding::uniform(5.0));
        assert_eq!(
            "1 2 3 4".parse::<Padding>()?,
            Padding::new(1.0, 2.0, 3.0, 4.0)
        );
        assert!("1 2".parse::<Padding>().is_err());
        Ok(())
    }
}
