use std::{fmt, str::FromStr};

use super::Error;

/// Per-axis placement policy for a widget within its parent's allotted box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Keep the widget's explicit offset on this axis.
    #[default]
    None,
    /// Anchor at the padded minimum edge.
    Min,
    /// Anchor at the padded maximum edge.
    Max,
    /// Center between the padded edges, rounded to a whole unit.
    Center,
    /// Anchor at the padded minimum edge and stretch to the padded maximum.
    Fill,
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Min => "min",
            Self::Max => "max",
            Self::Center => "center",
            Self::Fill => "fill",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Align {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "none" => Ok(Self::None),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "center" => Ok(Self::Center),
            "fill" => Ok(Self::Fill),
            other => Err(Error::Parse(format!("unknown alignment {:?}", other))),
        }
    }
}

/// Independent horizontal and vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlignPair {
    /// Horizontal policy.
    pub x: Align,
    /// Vertical policy.
    pub y: Align,
}

impl AlignPair {
    /// Construct from both axes.
    pub fn new(x: Align, y: Align) -> Self {
        Self { x, y }
    }

    /// The same policy on both axes.
    pub fn both(a: Align) -> Self {
        Self { x: a, y: a }
    }
}

impl From<Align> for AlignPair {
    fn from(a: Align) -> Self {
        Self::both(a)
    }
}

impl fmt::Display for AlignPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

impl FromStr for AlignPair {
    type Err = Error;

    /// A single policy applies to both axes; two apply to x then y.
    fn from_str(s: &str) -> Result<Self, Error> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.as_slice() {
            [a] => Ok(Self::both(a.parse()?)),
            [x, y] => Ok(Self::new(x.parse()?, y.parse()?)),
            other => Err(Error::Parse(format!(
                "expected 1 or 2 alignments, got {}",
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
        assert_eq!("fill".parse::<Align>()?, Align::Fill);
        assert!("middle".parse::<Align>().is_err());
        assert_eq!(
            "min center".parse::<AlignPair>()?,
            AlignPair::new(Align::Min, Align::Center)
        );
        assert_eq!("fill".parse::<AlignPair>()?, AlignPair::both(Align::Fill));
        Ok(())
    }

    #[test]
    fn format_round_trip() -> Result<()> {
        let a = AlignPair::new(Align::Max, Align::None);
        assert_eq!(a.to_string().parse::<AlignPair>()?, a);
        Ok(())
    }
}
