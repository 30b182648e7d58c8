use std::fmt::Display;

/// Integer grid coordinate. `x` grows to the right, `y` grows downwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// Sugar macro
#[macro_export]
macro_rules! c {
    ($x: expr, $y: expr) => {
        $crate::coord::Coord::new($x, $y)
    };
}

impl Coord {
    pub const ZERO: Coord = Coord { x: 0, y: 0 };
    pub const ONE: Coord = Coord { x: 1, y: 1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v }
    }

    /// Manhattan length
    pub fn length(&self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Manhattan distance between two coordinates
    pub fn distance(&self, other: &Coord) -> i32 {
        (*self - *other).length()
    }

    pub fn clamp(&self, min: Self, max: Self) -> Coord {
        Self {
            x: self.x.clamp(min.x, max.x),
            y: self.y.clamp(min.y, max.y),
        }
    }

    pub fn max(&self, other: Self) -> Coord {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Every coordinate with Manhattan distance <= `radius` from `self`, row by row.
    /// Not bounds checked.
    pub fn diamond(self, radius: i32) -> impl Iterator<Item = Coord> {
        let radius = radius.max(0);
        (-radius..=radius).flat_map(move |dy| {
            let span = radius - dy.abs();
            (-span..=span).map(move |dx| Coord::new(self.x + dx, self.y + dy))
        })
    }

    /// Every coordinate of the `size`×`size` square centered on `self`, row by row.
    /// Even sizes extend one cell further towards the origin.
    pub fn square(self, size: i32) -> impl Iterator<Item = Coord> {
        let start = self - Coord::splat(size / 2);
        (0..size.max(0)).flat_map(move |dy| {
            (0..size.max(0)).map(move |dx| Coord::new(start.x + dx, start.y + dy))
        })
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::ops::Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Div<i32> for Coord {
    type Output = Coord;

    fn div(self, rhs: i32) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}
