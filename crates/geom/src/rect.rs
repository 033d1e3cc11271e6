use std::{fmt, str::FromStr};

use super::{Error, Offset, Padding, Point, Size};

/// A rectangle located in device-unit space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a rect from a corner and dimensions.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            tl: Point::new(x, y),
            w,
            h,
        }
    }

    /// A zero-sized rect at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The size of this rect.
    pub fn size(&self) -> Size {
        Size {
            w: self.w,
            h: self.h,
        }
    }

    /// True if the rect has no area.
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// True if the point falls inside the rect. The minimum edge is
    /// inclusive, the maximum edge exclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.tl.x && p.x < self.tl.x + self.w && p.y >= self.tl.y && p.y < self.tl.y + self.h
    }

    /// Translate the rect by an offset.
    pub fn shift(&self, o: Offset) -> Self {
        Self {
            tl: self.tl + o,
            w: self.w,
            h: self.h,
        }
    }

    /// Shrink the rect by a padding inset. Degenerate results collapse to
    /// zero extent rather than going negative.
    pub fn inset(&self, p: Padding) -> Self {
        let w = (self.w - p.left - p.right).max(0.0);
        let h = (self.h - p.top - p.bottom).max(0.0);
        Self {
            tl: Point::new(self.tl.x + p.left, self.tl.y + p.top),
            w,
            h,
        }
    }

    /// The smallest rect enclosing both self and `other`.
    pub fn union(&self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.tl.x.min(other.tl.x);
        let y = self.tl.y.min(other.tl.y);
        let r = (self.tl.x + self.w).max(other.tl.x + other.w);
        let b = (self.tl.y + self.h).max(other.tl.y + other.h);
        Self::new(x, y, r - x, b - y)
    }

    /// The overlap of self and `other`, if any.
    pub fn intersect(&self, other: Self) -> Option<Self> {
        let x = self.tl.x.max(other.tl.x);
        let y = self.tl.y.max(other.tl.y);
        let r = (self.tl.x + self.w).min(other.tl.x + other.w);
        let b = (self.tl.y + self.h).min(other.tl.y + other.h);
        if r > x && b > y {
            Some(Self::new(x, y, r - x, b - y))
        } else {
            None
        }
    }
}

impl From<(Point, Size)> for Rect {
    fn from(v: (Point, Size)) -> Self {
        Self {
            tl: v.0,
            w: v.1.w,
            h: v.1.h,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.tl.x, self.tl.y, self.w, self.h)
    }
}

impl FromStr for Rect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match super::parse_units(s)?.as_slice() {
            [x, y, w, h] => Ok(Self::new(*x, *y, *w, *h)),
            other => Err(Error::Parse(format!(
                "expected 4 values, got {}",
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
    fn contains() -> Result<()> {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(19.9, 19.9)));
        assert!(!r.contains(Point::new(20.0, 10.0)));
        Ok(())
    }

    #[test]
    fn inset() -> Result<()> {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0).inset(Padding::uniform(5.0));
        assert_eq!(r, Rect::new(5.0, 5.0, 90.0, 90.0));
        let tiny = Rect::new(0.0, 0.0, 4.0, 4.0).inset(Padding::uniform(5.0));
        assert_eq!(tiny.size(), Size::zero());
        Ok(())
    }

    #[test]
    fn union_intersect() -> Result<()> {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(b), Rect::new(0.0, 0.0, 15.0, 15.0));
        assert_eq!(a.intersect(b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.intersect(Rect::new(20.0, 20.0, 1.0, 1.0)), None);
        Ok(())
    }

    #[test]
    fn parse() -> Result<()> {
        assert_eq!("1 2 3 4".parse::<Rect>()?, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert!("1 2 3".parse::<Rect>().is_err());
        Ok(())
    }
}
