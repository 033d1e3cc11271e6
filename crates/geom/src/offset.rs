use std::{
    fmt,
    ops::{Add, Neg},
    str::FromStr,
};

use super::Error;

/// A displacement between two points, in device units. Widget positions are
/// stored as offsets from the parent's content origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    /// Horizontal displacement.
    pub x: f32,
    /// Vertical displacement.
    pub y: f32,
}

impl Offset {
    /// Construct an offset from components.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The zero displacement.
    pub fn zero() -> Self {
        Self::default()
    }

    /// True if both components are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Offset {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Neg for Offset {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl From<(f32, f32)> for Offset {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

impl FromStr for Offset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let (x, y) = super::parse_pair(s)?;
        Ok(Self { x, y })
    }
}
