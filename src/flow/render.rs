use log::debug;

use crate::geometry::{Path, Rect};
use crate::scene::Scene;

/// A target that connectors draw themselves onto.
pub trait Surface {
    /// Strokes `path` with the given line width.
    fn stroke(&mut self, path: &Path, width: f32);

    /// Fills the closed `path` (non-zero winding).
    fn fill(&mut self, path: &Path);
}

/// Accumulates `<path>` elements in a single colour.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    svg: String,
    color: String,
}

impl SvgSurface {
    pub fn new(color: &str) -> Self {
        Self {
            svg: String::new(),
            color: escape_xml(color),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.svg
    }

    pub fn into_svg(self) -> String {
        self.svg
    }
}

impl Surface for SvgSurface {
    fn stroke(&mut self, path: &Path, width: f32) {
        if width.is_nan() || width <= 0.0 || path.is_empty() {
            return;
        }
        self.svg.push_str(&format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-linecap="butt" stroke-linejoin="miter"/>"#,
            path.to_svg_data(),
            self.color,
            width
        ));
        self.svg.push('\n');
    }

    fn fill(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        self.svg.push_str(&format!(
            r#"<path d="{}" fill="{}" fill-rule="nonzero"/>"#,
            path.to_svg_data(),
            self.color
        ));
        self.svg.push('\n');
    }
}

/// Renders the scene's nodes and connectors to an SVG fragment.
///
/// Returns the fragment together with the canvas width and height.
pub fn render_scene(scene: &Scene) -> (String, f32, f32) {
    let style = &scene.style;
    let mut svg = String::new();

    // Nodes first so connectors sit on top of their outlines
    for (node, rect) in scene.anchors().iter() {
        debug!("node {node} at {rect:?}");
        svg.push_str(&render_node(&rect, style.node_radius, &style.node_fill, &style.node_stroke));
        svg.push('\n');
    }

    let cap = style.end_cap();
    let mut surface = SvgSurface::new(&style.line_color);
    for flow in scene.connectors() {
        flow.decorate(&cap).draw(&mut surface);
    }
    svg.push_str(surface.as_str());

    let (width, height) = scene.size();
    (svg, width, height)
}

/// Renders a standalone SVG document with a background and `padding` on
/// every side.
pub fn render_document(scene: &Scene, padding: f32) -> String {
    let (inner, width, height) = render_scene(scene);
    let total_w = width + padding * 2.0;
    let total_h = height + padding * 2.0;

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total_w}" height="{total_h}" viewBox="0 0 {total_w} {total_h}">
<rect width="{total_w}" height="{total_h}" fill="{background}"/>
<g transform="translate({padding},{padding})">
{inner}</g>
</svg>"#,
        background = escape_xml(&scene.style.background),
    )
}

fn render_node(rect: &Rect, radius: f32, fill: &str, stroke: &str) -> String {
    let radius = radius.max(0.0).min(rect.width.min(rect.height) / 2.0);
    format!(
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{:.2}" ry="{:.2}" fill="{}" stroke="{}" stroke-width="1.5"/>"#,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        radius,
        radius,
        escape_xml(fill),
        escape_xml(stroke)
    )
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    const SCENE: &str = r#"
max_magnitude = 1000

[nodes]
source = { x = 150, y = 0, width = 100, height = 100 }
storage = { x = 0, y = 150, width = 100, height = 100 }
grid = { x = 300, y = 150, width = 100, height = 100 }
load = { x = 150, y = 300, width = 100, height = 100 }

[flows]
source_to_grid = 1000
grid_to_load = -250
"#;

    fn line() -> Path {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path
    }

    #[test]
    fn stroke_emits_butt_capped_path() {
        let mut surface = SvgSurface::new("#123456");
        surface.stroke(&line(), 3.0);
        assert_eq!(
            surface.as_str(),
            "<path d=\"M 0.00 0.00 L 10.00 0.00\" fill=\"none\" stroke=\"#123456\" stroke-width=\"3.00\" stroke-linecap=\"butt\" stroke-linejoin=\"miter\"/>\n"
        );
    }

    #[test]
    fn zero_width_strokes_are_dropped() {
        let mut surface = SvgSurface::new("black");
        surface.stroke(&line(), 0.0);
        surface.stroke(&line(), -1.0);
        surface.stroke(&line(), f32::NAN);
        surface.stroke(&Path::new(), 2.0);
        assert!(surface.into_svg().is_empty());
    }

    #[test]
    fn colours_are_escaped() {
        let mut surface = SvgSurface::new("a\"b");
        surface.fill(&line());
        assert!(surface.as_str().contains("fill=\"a&quot;b\""));
        assert!(surface.as_str().contains("fill-rule=\"nonzero\""));
    }

    #[test]
    fn scene_draws_nodes_then_connectors() {
        let scene = Scene::from_toml(SCENE).expect("scene");
        let (svg, width, height) = render_scene(&scene);

        assert_eq!((width, height), (400.0, 400.0));
        assert_eq!(svg.matches("<rect").count(), 4);
        // zero flows have width 0 and no cap, so only two strokes remain
        assert_eq!(svg.matches("fill=\"none\"").count(), 2);
        assert_eq!(svg.matches("fill-rule=\"nonzero\"").count(), 2);
        let last_rect = svg.rfind("<rect").expect("rect");
        let first_path = svg.find("<path").expect("path");
        assert!(last_rect < first_path);
        assert!(svg.contains("stroke-width=\"30.00\""));
    }

    #[test]
    fn document_wraps_fragment_with_background() {
        let scene = Scene::from_toml(SCENE).expect("scene");
        let doc = render_document(&scene, 20.0);
        assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"440\" height=\"440\""));
        assert!(doc.contains("<rect width=\"440\" height=\"440\" fill=\"#ffffff\"/>"));
        assert!(doc.contains("translate(20,20)"));
        assert!(doc.trim_end().ends_with("</svg>"));
    }
}
