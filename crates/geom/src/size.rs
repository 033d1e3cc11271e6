use std::{fmt, str::FromStr};

use super::{Error, Point, Rect};

/// A width and height with no location.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in device units.
    pub w: f32,
    /// Height in device units.
    pub h: f32,
}

impl Size {
    /// Construct a size from dimensions.
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// A zero-valued size.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The largest representable size, used as the "unconstrained" maximum.
    pub fn infinite() -> Self {
        Self {
            w: f32::INFINITY,
            h: f32::INFINITY,
        }
    }

    /// True if both dimensions are zero.
    pub fn is_zero(&self) -> bool {
        self.w == 0.0 && self.h == 0.0
    }

    /// Return a `Rect` with these dimensions located at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this size can enclose `other` in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// Round both dimensions up to whole device units.
    pub fn ceil(&self) -> Self {
        Self {
            w: self.w.ceil(),
            h: self.h.ceil(),
        }
    }

    /// Clamp both dimensions into `[min, max]` per axis.
    pub fn clamp(&self, min: Self, max: Self) -> Self {
        Self {
            w: self.w.clamp(min.w, max.w),
            h: self.h.clamp(min.h, max.h),
        }
    }

    /// Component-wise maximum.
    pub fn max(&self, other: Self) -> Self {
        Self {
            w: self.w.max(other.w),
            h: self.h.max(other.h),
        }
    }

    /// True if the size differs from `other` by less than [`super::EPSILON`]
    /// on both axes.
    pub fn near(&self, other: Self) -> bool {
        super::near(self.w, other.w) && super::near(self.h, other.h)
    }
}

impl From<(f32, f32)> for Size {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

impl From<Rect> for Size {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.w, self.h)
    }
}

impl FromStr for Size {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let (w, h) = super::parse_pair(s)?;
        if w < 0.0 || h < 0.0 {
            return Err(Error::Parse(format!("negative size {:?}", s)));
        }
        Ok(Self { w, h })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn clamp_and_ceil() -> Result<()> {
        let s = Size::new(5.2, 9.9).ceil();
        assert_eq!(s, Size::new(6.0, 10.0));
        let c = Size::new(50.0, 1.0).clamp(Size::new(2.0, 2.0), Size::new(10.0, 10.0));
        assert_eq!(c, Size::new(10.0, 2.0));
        Ok(())
    }

    #[test]
    fn near() -> Result<()> {
        assert!(Size::new(10.0, 10.0).near(Size::new(10.5, 9.5)));
        assert!(!Size::new(10.0, 10.0).near(Size::new(12.0, 10.0)));
        Ok(())
    }

    #[test]
    fn parse() -> Result<()> {
        assert_eq!("90 90".parse::<Size>()?, Size::new(90.0, 90.0));
        assert!("-1 5".parse::<Size>().is_err());
        Ok(())
    }
}
