mod path;

pub use path::{Path, PathCommand};
#[cfg(test)]
pub(crate) use path::point_on_circle;

use serde::{Deserialize, Serialize};

/// A coordinate on the drawing plane (y grows downwards, as in SVG)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns a copy translated by `dx`/`dy`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Moves `distance` along `heading`.
    pub fn step(self, heading: Heading, distance: f32) -> Self {
        let (ux, uy) = heading.unit();
        self.offset(ux * distance, uy * distance)
    }

    pub fn distance_to(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Free-function form of [`Point::offset`].
pub fn offset(point: Point, dx: f32, dy: f32) -> Point {
    point.offset(dx, dy)
}

/// One side of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Axis-aligned rectangle, as measured for a diagram node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Midpoint of the given side.
    pub fn edge_center(&self, side: Side) -> Point {
        match side {
            Side::Left => Point::new(self.x, self.center_y()),
            Side::Right => Point::new(self.right(), self.center_y()),
            Side::Top => Point::new(self.center_x(), self.y),
            Side::Bottom => Point::new(self.center_x(), self.bottom()),
        }
    }

    pub fn edge_centers(&self) -> EdgeCenters {
        EdgeCenters {
            left: self.edge_center(Side::Left),
            right: self.edge_center(Side::Right),
            top: self.edge_center(Side::Top),
            bottom: self.edge_center(Side::Bottom),
        }
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// The four side midpoints of a [`Rect`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCenters {
    pub left: Point,
    pub right: Point,
    pub top: Point,
    pub bottom: Point,
}

/// Free-function form of [`Rect::edge_centers`].
pub fn edge_centers(rect: &Rect) -> EdgeCenters {
    rect.edge_centers()
}

/// The axis a connector travels along first, leaving its start point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }
}

/// One of the four axis-aligned headings, in screen coordinates.
///
/// Angles follow the drawing plane: 0° points along +x and angles grow
/// towards +y, so `South` is 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    East,
    South,
    West,
    North,
}

impl Heading {
    pub fn degrees(self) -> f32 {
        match self {
            Heading::East => 0.0,
            Heading::South => 90.0,
            Heading::West => 180.0,
            Heading::North => 270.0,
        }
    }

    /// Unit vector, exact (no trigonometry involved).
    pub fn unit(self) -> (f32, f32) {
        match self {
            Heading::East => (1.0, 0.0),
            Heading::South => (0.0, 1.0),
            Heading::West => (-1.0, 0.0),
            Heading::North => (0.0, -1.0),
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Heading::East => Heading::West,
            Heading::South => Heading::North,
            Heading::West => Heading::East,
            Heading::North => Heading::South,
        }
    }
}

/// Sign of a coordinate delta, used as a lookup key for quadrant tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// NaN is treated as `Zero`.
    pub fn of(value: f32) -> Self {
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    pub fn unit(self) -> f32 {
        match self {
            Sign::Negative => -1.0,
            Sign::Zero => 0.0,
            Sign::Positive => 1.0,
        }
    }
}

/// Maps an angle in degrees into `[-180, 180)`.
///
/// Non-finite input yields NaN.
pub fn normalize_angle(degrees: f32) -> f32 {
    if (-180.0..180.0).contains(&degrees) {
        return degrees;
    }
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn edge_centers_of_rect() {
        let rect = Rect::new(10.0, 20.0, 100.0, 200.0);
        let centers = edge_centers(&rect);
        assert_eq!(centers.left, Point::new(10.0, 120.0));
        assert_eq!(centers.right, Point::new(110.0, 120.0));
        assert_eq!(centers.top, Point::new(60.0, 20.0));
        assert_eq!(centers.bottom, Point::new(60.0, 220.0));

        let small = Rect::new(110.0, 120.0, 10.0, 20.0);
        assert_eq!(small.edge_center(Side::Left), Point::new(110.0, 130.0));
        assert_eq!(small.edge_center(Side::Right), Point::new(120.0, 130.0));
        assert_eq!(small.edge_center(Side::Top), Point::new(115.0, 120.0));
        assert_eq!(small.edge_center(Side::Bottom), Point::new(115.0, 140.0));
    }

    #[test]
    fn offset_leaves_original_untouched() {
        let p = Point::new(3.0, 4.0);
        let q = offset(p, -1.0, 2.5);
        assert_eq!(p, Point::new(3.0, 4.0));
        assert_eq!(q, Point::new(2.0, 6.5));
    }

    #[test]
    fn direction_opposite_is_an_involution() {
        for d in [Direction::Horizontal, Direction::Vertical] {
            assert_ne!(d.opposite(), d);
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn normalize_angle_known_values() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(90.0), 90.0);
        assert_eq!(normalize_angle(180.0), -180.0);
        assert_eq!(normalize_angle(-180.0), -180.0);
        assert_eq!(normalize_angle(270.0), -90.0);
        assert_eq!(normalize_angle(-270.0), 90.0);
        assert_eq!(normalize_angle(720.0 + 45.0), 45.0);
    }

    #[test]
    fn normalize_angle_terminates_on_huge_input() {
        let a = normalize_angle(1.0e30);
        assert!((-180.0..180.0).contains(&a));
        assert!(normalize_angle(f32::INFINITY).is_nan());
    }

    #[test]
    fn rect_union_covers_both() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, -5.0, 5.0, 5.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -5.0, 25.0, 15.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        #[test]
        fn normalize_angle_range_and_idempotence(angle in -1.0e6f32..1.0e6f32) {
            let once = normalize_angle(angle);
            prop_assert!((-180.0..180.0).contains(&once), "{} -> {}", angle, once);
            prop_assert_eq!(normalize_angle(once), once);
        }
    }
}
