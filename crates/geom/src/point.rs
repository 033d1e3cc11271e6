use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

use super::{Error, Offset, Rect};

/// A location in device units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Construct a point from coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// True if both coordinates are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Clamp the point so it falls within `rect`.
    pub fn clamp(&self, rect: Rect) -> Self {
        Self {
            x: self.x.clamp(rect.tl.x, rect.tl.x + rect.w),
            y: self.y.clamp(rect.tl.y, rect.tl.y + rect.h),
        }
    }
}

impl Add<Offset> for Point {
    type Output = Self;

    fn add(self, o: Offset) -> Self {
        Self {
            x: self.x + o.x,
            y: self.y + o.y,
        }
    }
}

impl AddAssign<Offset> for Point {
    fn add_assign(&mut self, o: Offset) {
        self.x += o.x;
        self.y += o.y;
    }
}

impl Sub<Offset> for Point {
    type Output = Self;

    fn sub(self, o: Offset) -> Self {
        Self {
            x: self.x - o.x,
            y: self.y - o.y,
        }
    }
}

impl SubAssign<Offset> for Point {
    fn sub_assign(&mut self, o: Offset) {
        self.x -= o.x;
        self.y -= o.y;
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, other: Self) -> Offset {
        Offset {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let (x, y) = super::parse_pair(s)?;
        Ok(Self { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn arithmetic() -> Result<()> {
        let p = Point::new(3.0, 4.0) + Offset::new(1.0, -1.0);
        assert_eq!(p, Point::new(4.0, 3.0));
        assert_eq!(p - Point::new(1.0, 1.0), Offset::new(3.0, 2.0));
        Ok(())
    }

    #[test]
    fn parse() -> Result<()> {
        assert_eq!("3 4.5".parse::<Point>()?, Point::new(3.0, 4.5));
        assert!("3".parse::<Point>().is_err());
        assert_eq!(Point::new(1.0, 2.0).to_string(), "1 2");
        Ok(())
    }

    #[test]
    fn clamp() -> Result<()> {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(Point::new(0.0, 50.0).clamp(r), Point::new(10.0, 30.0));
        Ok(())
    }
}
