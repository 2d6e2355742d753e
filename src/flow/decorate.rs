use tiny_skia::Transform;

use super::cap::EndCap;
use super::connector::Connector;
use super::render::Surface;
use crate::geometry::{Direction, Path, Point};

/// A connector ready for drawing: the shortened stroke plus the cap fills.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedConnector {
    /// Stroke outline, shortened so it stops where each cap begins.
    pub line: Path,
    pub line_width: f32,
    /// Filled cap outlines, already rotated and placed on the original
    /// endpoints.
    pub start_cap: Option<Path>,
    pub end_cap: Option<Path>,
}

impl DecoratedConnector {
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.stroke(&self.line, self.line_width);
        for cap in [&self.start_cap, &self.end_cap].into_iter().flatten() {
            surface.fill(cap);
        }
    }
}

/// Combines `connector` with optional caps on either end.
///
/// The stroked line is inset by each cap's length so the two never overlap,
/// while each cap's tip lands exactly on the connector's own endpoint. A cap
/// longer than its leg shortens the line only up to the elbow.
pub fn decorate(
    connector: &Connector,
    start_cap: Option<&dyn EndCap>,
    end_cap: Option<&dyn EndCap>,
) -> DecoratedConnector {
    let line_width = connector.line_width;
    let (start_inset, end_inset) = connector.clamp_insets(
        start_cap.map_or(0.0, |cap| cap.inset(line_width, 1.0)),
        end_cap.map_or(0.0, |cap| cap.inset(line_width, 1.0)),
    );

    let line = connector.inset_by(start_inset, end_inset).path();

    DecoratedConnector {
        line,
        line_width,
        start_cap: start_cap
            .map(|cap| place_cap(cap, line_width, connector.start, connector.start_angle())),
        end_cap: end_cap
            .map(|cap| place_cap(cap, line_width, connector.end, connector.end_angle())),
    }
}

/// Spelled-out form of [`decorate`].
pub fn decorated_connector(
    start: Point,
    end: Point,
    radius: f32,
    direction: Direction,
    line_width: f32,
    start_cap: Option<&dyn EndCap>,
    end_cap: Option<&dyn EndCap>,
) -> DecoratedConnector {
    let connector = Connector::new(start, end)
        .with_radius(radius)
        .with_direction(direction)
        .with_line_width(line_width);
    decorate(&connector, start_cap, end_cap)
}

fn place_cap(cap: &dyn EndCap, line_width: f32, tip: Point, angle: f32) -> Path {
    // rotate about the tip (the outline's origin), then move the tip over
    let transform = Transform::from_rotate(angle).post_translate(tip.x, tip.y);
    cap.outline(line_width, 1.0).transformed(&transform)
}
