use crate::geometry::{Path, Point};

/// A filled shape capping one end of a connector.
///
/// Implementors describe themselves at 100% size for a line width of 1: the
/// tip sits at the origin and the body extends along +x, so the cap points
/// towards -x. Callers scale both the inset and the outline by the same
/// `line_width * size` factor.
pub trait EndCap {
    /// Length the cap occupies along the connector, at unit scale.
    fn unit_inset(&self) -> f32;

    /// Closed outline at unit scale.
    fn unit_outline(&self) -> Path;

    fn inset(&self, line_width: f32, size: f32) -> f32 {
        self.unit_inset() * line_width * size
    }

    fn outline(&self, line_width: f32, size: f32) -> Path {
        self.unit_outline().scaled(line_width * size)
    }
}

/// Arrow head with independently sized flanks.
///
/// Outline order: tip, left tip, rear end, right tip, back to the tip.
/// Widths are measured from the centre line, i.e. they are half-widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub center_length: f32,
    pub left_length: f32,
    pub right_length: f32,
    pub left_width: f32,
    pub right_width: f32,
}

impl Arrowhead {
    pub fn new(
        center_length: f32,
        left_length: f32,
        right_length: f32,
        left_width: f32,
        right_width: f32,
    ) -> Self {
        Self {
            center_length,
            left_length,
            right_length,
            left_width,
            right_width,
        }
    }

    /// Symmetric head with a flat rear; `width` is the full width.
    pub fn symmetric(length: f32, width: f32) -> Self {
        Self::new(length, length, length, width / 2.0, width / 2.0)
    }

    /// Symmetric head whose centre line may be shorter (notched) or longer
    /// (diamond-ish) than its flanks.
    pub fn with_side_length(center_length: f32, side_length: f32, width: f32) -> Self {
        Self::new(
            center_length,
            side_length,
            side_length,
            width / 2.0,
            width / 2.0,
        )
    }

    pub fn tip(&self) -> Point {
        Point::ORIGIN
    }

    pub fn left_tip(&self) -> Point {
        Point::new(self.left_length, -self.left_width)
    }

    pub fn rear_end(&self) -> Point {
        Point::new(self.center_length, 0.0)
    }

    pub fn right_tip(&self) -> Point {
        Point::new(self.right_length, self.right_width)
    }
}

impl Default for Arrowhead {
    fn default() -> Self {
        Self::symmetric(2.0, 1.5)
    }
}

impl EndCap for Arrowhead {
    fn unit_inset(&self) -> f32 {
        self.center_length
    }

    fn unit_outline(&self) -> Path {
        let mut path = Path::new();
        path.move_to(self.tip());
        path.line_to(self.left_tip());
        path.line_to(self.rear_end());
        path.line_to(self.right_tip());
        path.close();
        path
    }
}

/// Round cap whose far edge touches the tip point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub diameter: f32,
}

impl Disc {
    pub fn new(diameter: f32) -> Self {
        Self { diameter }
    }

    pub fn tip(&self) -> Point {
        Point::ORIGIN
    }
}

impl Default for Disc {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl EndCap for Disc {
    fn unit_inset(&self) -> f32 {
        self.diameter
    }

    fn unit_outline(&self) -> Path {
        let radius = self.diameter / 2.0;
        let center = Point::new(radius, 0.0);
        let mut path = Path::new();
        path.move_to(self.tip());
        // two half turns; a single SVG arc cannot describe a full circle
        path.arc(center, radius, 180.0, 0.0, false);
        path.arc(center, radius, 0.0, 180.0, false);
        path.close();
        path
    }
}

/// The cap shapes a diagram can be configured with
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cap {
    Arrow(Arrowhead),
    Disc(Disc),
}

impl EndCap for Cap {
    fn unit_inset(&self) -> f32 {
        match self {
            Cap::Arrow(arrow) => arrow.unit_inset(),
            Cap::Disc(disc) => disc.unit_inset(),
        }
    }

    fn unit_outline(&self) -> Path {
        match self {
            Cap::Arrow(arrow) => arrow.unit_outline(),
            Cap::Disc(disc) => disc.unit_outline(),
        }
    }
}
