use crate::geometry::{Direction, Heading, Path, Point, Sign, normalize_angle};

/// A two-legged connector with a rounded elbow.
///
/// The connector leaves `start` along `direction`, turns once, and arrives
/// at `end` along the other axis. Connectors are cheap values rebuilt on
/// every layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub start: Point,
    pub end: Point,
    /// Nominal corner radius; see [`Connector::effective_radius`].
    pub radius: f32,
    pub direction: Direction,
    /// Stroke width. Does not influence the geometry.
    pub line_width: f32,
}

/// The circular arc joining the two legs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elbow {
    pub center: Point,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub clockwise: bool,
}

impl Connector {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            radius: 0.0,
            direction: Direction::Horizontal,
            line_width: 1.0,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    fn signs(&self) -> (Sign, Sign) {
        (
            Sign::of(self.end.x - self.start.x),
            Sign::of(self.end.y - self.start.y),
        )
    }

    /// The nominal radius clipped to the room available on both axes.
    ///
    /// Zero when the endpoints share an x or y coordinate, or when the
    /// nominal radius is not positive.
    pub fn effective_radius(&self) -> f32 {
        if self.radius.is_nan() || self.radius <= 0.0 {
            return 0.0;
        }
        let horizontal_space = (self.start.x - self.end.x).abs();
        let vertical_space = (self.start.y - self.end.y).abs();
        let radius = self.radius.min(horizontal_space).min(vertical_space);
        if radius > 0.0 { radius } else { 0.0 }
    }

    /// The rounding arc, or `None` when the effective radius is zero.
    pub fn elbow(&self) -> Option<Elbow> {
        let radius = self.effective_radius();
        if radius <= 0.0 {
            return None;
        }

        let (sx, sy) = self.signs();
        let (start_angle, end_angle) = elbow_angles(self.direction, sx, sy)?;

        // offset from the first-leg endpoint along the first axis and from
        // the second-leg endpoint along the second axis, towards the inside
        let center = match self.direction {
            Direction::Horizontal => Point::new(
                self.end.x - radius * sx.unit(),
                self.start.y + radius * sy.unit(),
            ),
            Direction::Vertical => Point::new(
                self.start.x + radius * sx.unit(),
                self.end.y - radius * sy.unit(),
            ),
        };

        Some(Elbow {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise: normalize_angle(start_angle - end_angle) > 0.0,
        })
    }

    /// The connector's outline, ready to be stroked.
    ///
    /// Without room for an elbow this is a single straight segment.
    pub fn path(&self) -> Path {
        let mut path = Path::new();
        path.move_to(self.start);
        if let Some(elbow) = self.elbow() {
            path.arc(
                elbow.center,
                elbow.radius,
                elbow.start_angle,
                elbow.end_angle,
                elbow.clockwise,
            );
        }
        path.line_to(self.end);
        path
    }

    /// Heading pointing from `start` into the connector.
    pub fn start_heading(&self) -> Heading {
        let (sx, sy) = self.signs();
        tangent_headings(self.direction, sx, sy).0
    }

    /// Heading pointing from `end` back into the connector.
    pub fn end_heading(&self) -> Heading {
        let (sx, sy) = self.signs();
        tangent_headings(self.direction, sx, sy).1
    }

    /// Rotation, in degrees, for a cap placed on `start`.
    pub fn start_angle(&self) -> f32 {
        self.start_heading().degrees()
    }

    /// Rotation, in degrees, for a cap placed on `end`.
    pub fn end_angle(&self) -> f32 {
        self.end_heading().degrees()
    }

    /// `start` moved `inset` into the connector.
    pub fn inset_start(&self, inset: f32) -> Point {
        self.start.step(self.start_heading(), inset)
    }

    /// `end` moved `inset` into the connector.
    pub fn inset_end(&self, inset: f32) -> Point {
        self.end.step(self.end_heading(), inset)
    }

    /// Limits cap insets to the room each end has.
    ///
    /// An inset never reaches past the elbow of its own leg, and on an
    /// aligned connector the two insets together never exceed its length,
    /// so shortening never reverses the connector. Negative and NaN insets
    /// become 0.
    pub fn clamp_insets(&self, start_inset: f32, end_inset: f32) -> (f32, f32) {
        let start_inset = start_inset.max(0.0);
        let end_inset = end_inset.max(0.0);
        let dx = (self.end.x - self.start.x).abs();
        let dy = (self.end.y - self.start.y).abs();

        if dx == 0.0 || dy == 0.0 {
            let length = dx + dy;
            let total = start_inset + end_inset;
            if total > length {
                let share = length / total;
                return (start_inset * share, end_inset * share);
            }
            return (start_inset, end_inset);
        }

        let radius = self.effective_radius();
        let (first_leg, second_leg) = match self.direction {
            Direction::Horizontal => (dx - radius, dy - radius),
            Direction::Vertical => (dy - radius, dx - radius),
        };
        (
            start_inset.min(first_leg.max(0.0)),
            end_inset.min(second_leg.max(0.0)),
        )
    }

    /// The same connector, shortened at either end.
    pub fn inset_by(&self, start_inset: f32, end_inset: f32) -> Connector {
        Connector {
            start: self.inset_start(start_inset),
            end: self.inset_end(end_inset),
            ..*self
        }
    }
}

/// Outline of a connector between two points, without decoration.
pub fn connector_path(start: Point, end: Point, radius: f32, direction: Direction) -> Path {
    Connector::new(start, end)
        .with_radius(radius)
        .with_direction(direction)
        .path()
}

/// Arc angles at the elbow: the tangent must be horizontal where it meets
/// the horizontal leg and vertical where it meets the vertical leg.
fn elbow_angles(direction: Direction, dx: Sign, dy: Sign) -> Option<(f32, f32)> {
    use Sign::{Negative, Positive};

    let angles = match (direction, dx, dy) {
        (Direction::Horizontal, Positive, Positive) => (-90.0, 0.0),
        (Direction::Horizontal, Negative, Positive) => (-90.0, 180.0),
        (Direction::Horizontal, Positive, Negative) => (90.0, 0.0),
        (Direction::Horizontal, Negative, Negative) => (90.0, 180.0),
        (Direction::Vertical, Positive, Positive) => (180.0, 90.0),
        (Direction::Vertical, Negative, Positive) => (0.0, 90.0),
        (Direction::Vertical, Positive, Negative) => (180.0, -90.0),
        (Direction::Vertical, Negative, Negative) => (0.0, -90.0),
        _ => return None,
    };
    Some(angles)
}

/// `(start, end)` headings into the connector, keyed by the first axis and
/// the signs of `end - start`. Ties on the leading axis fall back to the
/// trailing axis.
fn tangent_headings(direction: Direction, dx: Sign, dy: Sign) -> (Heading, Heading) {
    use Heading::{East, North, South, West};
    use Sign::{Negative, Positive, Zero};

    match (direction, dx, dy) {
        (Direction::Horizontal, Positive, Positive) => (East, North),
        (Direction::Horizontal, Positive, Negative) => (East, South),
        (Direction::Horizontal, Positive, Zero) => (East, West),
        (Direction::Horizontal, Negative, Positive) => (West, North),
        (Direction::Horizontal, Negative, Negative) => (West, South),
        (Direction::Horizontal, Negative, Zero) => (West, East),
        (Direction::Horizontal, Zero, Positive) => (South, North),
        (Direction::Horizontal, Zero, Negative) => (North, South),
        (Direction::Horizontal, Zero, Zero) => (South, West),

        (Direction::Vertical, Positive, Positive) => (South, West),
        (Direction::Vertical, Negative, Positive) => (South, East),
        (Direction::Vertical, Zero, Positive) => (South, North),
        (Direction::Vertical, Positive, Negative) => (North, West),
        (Direction::Vertical, Negative, Negative) => (North, East),
        (Direction::Vertical, Zero, Negative) => (North, South),
        (Direction::Vertical, Positive, Zero) => (East, West),
        (Direction::Vertical, Negative, Zero) => (West, East),
        (Direction::Vertical, Zero, Zero) => (East, North),
    }
}
