use {
    derive_more::{From, Into},
    std::{
        fmt,
        iter::Sum,
        ops::{Add, AddAssign, Mul, Sub, SubAssign},
    },
};

/// Direction along which a box container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Children are placed from left to right and share the box height.
    Horizontal,
    /// Children are placed from top to bottom and share the box width.
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Pixel count. Arithmetic saturates at the `i32` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, From, Into)]
pub struct PhysicalPixels(i32);

impl PhysicalPixels {
    pub const fn from_i32(value: i32) -> Self {
        Self(value)
    }

    pub const fn to_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PhysicalPixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for PhysicalPixels {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for PhysicalPixels {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for PhysicalPixels {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for PhysicalPixels {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for PhysicalPixels {
    fn sum<I: Iterator<Item = PhysicalPixels>>(iter: I) -> Self {
        iter.fold(Self(0), Add::add)
    }
}

impl<'a> Sum<&'a PhysicalPixels> for PhysicalPixels {
    fn sum<I: Iterator<Item = &'a PhysicalPixels>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Mul<i32> for PhysicalPixels {
    type Output = PhysicalPixels;

    fn mul(self, rhs: i32) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

pub trait PpxSuffix {
    fn ppx(self) -> PhysicalPixels;
}

impl PpxSuffix for i32 {
    fn ppx(self) -> PhysicalPixels {
        PhysicalPixels(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    x: PhysicalPixels,
    y: PhysicalPixels,
}

impl Point {
    pub const fn new(x: PhysicalPixels, y: PhysicalPixels) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> PhysicalPixels {
        self.x
    }

    pub fn y(&self) -> PhysicalPixels {
        self.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    x: PhysicalPixels,
    y: PhysicalPixels,
}

impl Size {
    pub const fn new(x: PhysicalPixels, y: PhysicalPixels) -> Self {
        Self { x, y }
    }

    /// Builds a size from its extent along `axis` and across it.
    pub fn from_axis(axis: Axis, along: PhysicalPixels, across: PhysicalPixels) -> Self {
        match axis {
            Axis::Horizontal => Self::new(along, across),
            Axis::Vertical => Self::new(across, along),
        }
    }

    pub fn x(&self) -> PhysicalPixels {
        self.x
    }

    pub fn y(&self) -> PhysicalPixels {
        self.y
    }

    pub fn along(&self, axis: Axis) -> PhysicalPixels {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn across(&self, axis: Axis) -> PhysicalPixels {
        match axis {
            Axis::Horizontal => self.y,
            Axis::Vertical => self.x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    top_left: Point,
    size: Size,
}

impl Rect {
    pub const fn from_xywh(
        x: PhysicalPixels,
        y: PhysicalPixels,
        w: PhysicalPixels,
        h: PhysicalPixels,
    ) -> Rect {
        Self::from_pos_size(Point::new(x, y), Size::new(w, h))
    }

    pub const fn from_pos_size(top_left: Point, size: Size) -> Self {
        Self { top_left, size }
    }

    pub fn left(&self) -> PhysicalPixels {
        self.top_left.x
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn size_x(&self) -> PhysicalPixels {
        self.size.x
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.ppx() || self.size.y <= 0.ppx()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.size.x, self.size.y, self.top_left.x, self.top_left.y
        )
    }
}
