use tiny_skia::Transform;

use super::Point;

/// A single drawing instruction of a [`Path`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc. Like Core Graphics' `addArc`, a straight line joins the
    /// current point to the arc's start first.
    ///
    /// Angles are in degrees on the drawing plane (0° along +x, growing
    /// towards +y). `clockwise` means the sweep runs through decreasing
    /// angles, i.e. clockwise in y-up terms.
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    },
    Close,
}

/// Abstract, surface-independent path description
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    pub fn line_to(&mut self, point: Point) {
        self.commands.push(PathCommand::LineTo(point));
    }

    pub fn arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) {
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn has_arc(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, PathCommand::Arc { .. }))
    }

    /// Applies a similarity transform (uniform scale, rotation, translation,
    /// optionally a reflection). Arcs keep their shape: centres are mapped,
    /// radii scaled and angles rotated.
    pub fn transformed(&self, transform: &Transform) -> Path {
        let scale = transform.sx.hypot(transform.ky);
        let rotation = transform.ky.atan2(transform.sx).to_degrees();
        let reflects = transform.sx * transform.sy - transform.kx * transform.ky < 0.0;

        let commands = self
            .commands
            .iter()
            .map(|command| match *command {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(map_point(transform, p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(map_point(transform, p)),
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                } => {
                    let (start_angle, end_angle, clockwise) = if reflects {
                        (rotation - start_angle, rotation - end_angle, !clockwise)
                    } else {
                        (rotation + start_angle, rotation + end_angle, clockwise)
                    };
                    PathCommand::Arc {
                        center: map_point(transform, center),
                        radius: radius * scale,
                        start_angle,
                        end_angle,
                        clockwise,
                    }
                }
                PathCommand::Close => PathCommand::Close,
            })
            .collect();

        Path { commands }
    }

    /// Uniform scale about the origin.
    pub fn scaled(&self, factor: f32) -> Path {
        self.transformed(&Transform::from_scale(factor, factor))
    }

    /// The point the pen rests on after the last command.
    pub fn current_point(&self) -> Option<Point> {
        let mut current = None;
        let mut subpath_start = None;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    current = Some(p);
                    subpath_start = Some(p);
                }
                PathCommand::LineTo(p) => current = Some(p),
                PathCommand::Arc {
                    center,
                    radius,
                    end_angle,
                    ..
                } => current = Some(point_on_circle(center, radius, end_angle)),
                PathCommand::Close => current = subpath_start,
            }
        }
        current
    }

    /// SVG `d` attribute data.
    pub fn to_svg_data(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => parts.push(format!("M {:.2} {:.2}", p.x, p.y)),
                PathCommand::LineTo(p) => parts.push(format!("L {:.2} {:.2}", p.x, p.y)),
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                } => {
                    let from = point_on_circle(center, radius, start_angle);
                    let to = point_on_circle(center, radius, end_angle);
                    let extent = sweep_extent(start_angle, end_angle, clockwise);
                    let large_arc = u8::from(extent > 180.0);
                    // SVG's sweep flag 1 is the direction of increasing angles
                    let sweep = u8::from(!clockwise);
                    let joint = if parts.is_empty() { "M" } else { "L" };
                    parts.push(format!("{joint} {:.2} {:.2}", from.x, from.y));
                    parts.push(format!(
                        "A {:.2} {:.2} 0 {} {} {:.2} {:.2}",
                        radius, radius, large_arc, sweep, to.x, to.y
                    ));
                }
                PathCommand::Close => parts.push("Z".to_string()),
            }
        }
        parts.join(" ")
    }

    /// Whether `point` lies on the outline within `tolerance`.
    pub fn passes_through(&self, point: Point, tolerance: f32) -> bool {
        let mut current: Option<Point> = None;
        let mut subpath_start: Option<Point> = None;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    if p.distance_to(point) <= tolerance {
                        return true;
                    }
                    current = Some(p);
                    subpath_start = Some(p);
                }
                PathCommand::LineTo(p) => {
                    let from = current.unwrap_or(p);
                    if segment_distance(point, from, p) <= tolerance {
                        return true;
                    }
                    current = Some(p);
                }
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                } => {
                    let arc_start = point_on_circle(center, radius, start_angle);
                    let from = current.unwrap_or(arc_start);
                    if segment_distance(point, from, arc_start) <= tolerance {
                        return true;
                    }
                    if on_arc(point, center, radius, start_angle, end_angle, clockwise, tolerance)
                    {
                        return true;
                    }
                    if subpath_start.is_none() {
                        subpath_start = Some(arc_start);
                    }
                    current = Some(point_on_circle(center, radius, end_angle));
                }
                PathCommand::Close => {
                    if let (Some(from), Some(to)) = (current, subpath_start) {
                        if segment_distance(point, from, to) <= tolerance {
                            return true;
                        }
                    }
                    current = subpath_start;
                }
            }
        }

        false
    }
}

fn map_point(transform: &Transform, point: Point) -> Point {
    let mut points = [tiny_skia::Point::from_xy(point.x, point.y)];
    transform.map_points(&mut points);
    Point::new(points[0].x, points[0].y)
}

pub(crate) fn point_on_circle(center: Point, radius: f32, degrees: f32) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Point::new(center.x + radius * cos, center.y + radius * sin)
}

/// Angular length in `[0, 360)` covered when sweeping from `start` to `end`.
fn sweep_extent(start: f32, end: f32, clockwise: bool) -> f32 {
    if clockwise {
        (start - end).rem_euclid(360.0)
    } else {
        (end - start).rem_euclid(360.0)
    }
}

fn segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}

fn on_arc(
    p: Point,
    center: Point,
    radius: f32,
    start: f32,
    end: f32,
    clockwise: bool,
    tolerance: f32,
) -> bool {
    let distance = p.distance_to(center);
    if (distance - radius).abs() > tolerance {
        return false;
    }
    if radius <= tolerance {
        return true;
    }

    let angle = (p.y - center.y).atan2(p.x - center.x).to_degrees();
    let extent = sweep_extent(start, end, clockwise);
    let along = sweep_extent(start, angle, clockwise);
    let slack = (tolerance / radius).to_degrees();
    along <= extent + slack || along >= 360.0 - slack
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_to(a: Point, b: Point) -> bool {
        a.distance_to(b) < 1e-3
    }

    fn quarter_arc() -> Path {
        let mut path = Path::new();
        path.move_to(Point::new(50.0, 40.0));
        path.arc(Point::new(60.0, 170.0), 10.0, 180.0, 90.0, true);
        path.line_to(Point::new(260.0, 180.0));
        path
    }

    #[test]
    fn passes_through_lines_and_arc() {
        let path = quarter_arc();
        assert!(path.passes_through(Point::new(50.0, 40.0), 0.01));
        assert!(path.passes_through(Point::new(50.0, 100.0), 0.01));
        assert!(path.passes_through(Point::new(50.0, 170.0), 0.01));
        assert!(path.passes_through(Point::new(60.0, 180.0), 0.01));
        assert!(path.passes_through(Point::new(260.0, 180.0), 0.01));

        // on the short corner arc
        let mid = point_on_circle(Point::new(60.0, 170.0), 10.0, 135.0);
        assert!(path.passes_through(mid, 0.01));

        // on the circle, but on the long way round
        let far = point_on_circle(Point::new(60.0, 170.0), 10.0, 315.0);
        assert!(!path.passes_through(far, 0.01));
        assert!(!path.passes_through(Point::new(100.0, 100.0), 0.01));
    }

    #[test]
    fn current_point_follows_arc_and_close() {
        let path = quarter_arc();
        assert!(close_to(
            path.current_point().expect("non-empty"),
            Point::new(260.0, 180.0)
        ));

        let mut closed = Path::new();
        closed.move_to(Point::ORIGIN);
        closed.line_to(Point::new(1.0, 1.0));
        closed.close();
        assert_eq!(closed.current_point(), Some(Point::ORIGIN));
        assert_eq!(Path::new().current_point(), None);
    }

    #[test]
    fn svg_data_emits_short_clockwise_arc() {
        let data = quarter_arc().to_svg_data();
        assert_eq!(
            data,
            "M 50.00 40.00 L 50.00 170.00 A 10.00 10.00 0 0 0 60.00 180.00 L 260.00 180.00"
        );
    }

    #[test]
    fn leading_arc_starts_a_subpath() {
        let mut path = Path::new();
        path.arc(Point::new(10.0, 10.0), 1.0, 0.0, 90.0, false);
        assert_eq!(path.to_svg_data(), "M 11.00 10.00 A 1.00 1.00 0 0 1 10.00 11.00");
    }

    #[test]
    fn transformed_rotates_arcs_and_points() {
        let mut path = Path::new();
        path.move_to(Point::new(1.0, 0.0));
        path.arc(Point::ORIGIN, 1.0, 0.0, 90.0, false);

        let rotated = path.transformed(&Transform::from_rotate(90.0).post_translate(5.0, 5.0));
        match rotated.commands() {
            [
                PathCommand::MoveTo(p),
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                },
            ] => {
                assert!(close_to(*p, Point::new(5.0, 6.0)));
                assert!(close_to(*center, Point::new(5.0, 5.0)));
                assert!((radius - 1.0).abs() < 1e-5);
                assert!((start_angle - 90.0).abs() < 1e-3);
                assert!((end_angle - 180.0).abs() < 1e-3);
                assert!(!clockwise);
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn reflection_flips_arc_direction() {
        let mut path = Path::new();
        path.arc(Point::ORIGIN, 2.0, 0.0, 90.0, false);
        let mirrored = path.transformed(&Transform::from_scale(1.0, -1.0));
        let end = mirrored.current_point().expect("arc end");
        assert!(close_to(end, Point::new(0.0, -2.0)));
        assert!(matches!(
            mirrored.commands()[0],
            PathCommand::Arc {
                clockwise: true,
                ..
            }
        ));
    }

    #[test]
    fn scaled_is_uniform_about_origin() {
        let mut path = Path::new();
        path.move_to(Point::ORIGIN);
        path.line_to(Point::new(2.0, -1.0));
        let scaled = path.scaled(3.0);
        assert_eq!(
            scaled.commands(),
            &[
                PathCommand::MoveTo(Point::ORIGIN),
                PathCommand::LineTo(Point::new(6.0, -3.0))
            ]
        );
    }
}
