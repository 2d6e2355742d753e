use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::flow::{
    AnchorSet, Arrowhead, CORNER_RADIUS, Cap, Disc, FlowConnector, Flows, NodeId, Sizing,
    WIDTH_SCALE, derive_connectors,
};
use crate::geometry::Rect;

const LINE_COLOR: &str = "#2b7bb9";
const NODE_STROKE: &str = "#333333";
const NODE_FILL: &str = "#f5f5f5";
const BACKGROUND: &str = "#ffffff";

const ARROW_LENGTH: f32 = 1.2;
const ARROW_WIDTH: f32 = 2.5;
const DISC_DIAMETER: f32 = 2.0;
const NODE_RADIUS: f32 = 8.0;

/// One energy-flow diagram: measured nodes, flow magnitudes and styling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub max_magnitude: Option<f32>,
    #[serde(default)]
    pub nodes: Nodes,
    #[serde(default)]
    pub flows: Flows,
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default)]
    pub style: FlowStyle,

    #[serde(skip)]
    anchors: AnchorSet,
}

/// Measured node rectangles; unmeasured nodes are simply absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nodes {
    #[serde(default)]
    pub source: Option<Rect>,
    #[serde(default)]
    pub storage: Option<Rect>,
    #[serde(default)]
    pub grid: Option<Rect>,
    #[serde(default)]
    pub load: Option<Rect>,
}

impl Nodes {
    pub fn get(&self, node: NodeId) -> Option<Rect> {
        match node {
            NodeId::Source => self.source,
            NodeId::Storage => self.storage,
            NodeId::Grid => self.grid,
            NodeId::Load => self.load,
        }
    }

    pub fn measurements(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        NodeId::ALL
            .into_iter()
            .filter_map(|node| self.get(node).map(|rect| (node, rect)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapKind {
    #[default]
    Arrow,
    Disc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStyle {
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
    #[serde(default = "default_width_scale")]
    pub width_scale: f32,

    #[serde(default)]
    pub cap: CapKind,
    #[serde(default = "default_arrow_length")]
    pub arrow_length: f32,
    #[serde(default = "default_arrow_width")]
    pub arrow_width: f32,
    #[serde(default = "default_disc_diameter")]
    pub disc_diameter: f32,

    #[serde(default = "default_line_color")]
    pub line_color: String,
    #[serde(default = "default_node_stroke")]
    pub node_stroke: String,
    #[serde(default = "default_node_fill")]
    pub node_fill: String,
    #[serde(default = "default_node_radius")]
    pub node_radius: f32,
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_corner_radius() -> f32 {
    CORNER_RADIUS
}
fn default_width_scale() -> f32 {
    WIDTH_SCALE
}
fn default_arrow_length() -> f32 {
    ARROW_LENGTH
}
fn default_arrow_width() -> f32 {
    ARROW_WIDTH
}
fn default_disc_diameter() -> f32 {
    DISC_DIAMETER
}
fn default_line_color() -> String {
    LINE_COLOR.to_string()
}
fn default_node_stroke() -> String {
    NODE_STROKE.to_string()
}
fn default_node_fill() -> String {
    NODE_FILL.to_string()
}
fn default_node_radius() -> f32 {
    NODE_RADIUS
}
fn default_background() -> String {
    BACKGROUND.to_string()
}

impl Default for FlowStyle {
    fn default() -> Self {
        Self {
            corner_radius: default_corner_radius(),
            width_scale: default_width_scale(),
            cap: CapKind::default(),
            arrow_length: default_arrow_length(),
            arrow_width: default_arrow_width(),
            disc_diameter: default_disc_diameter(),
            line_color: default_line_color(),
            node_stroke: default_node_stroke(),
            node_fill: default_node_fill(),
            node_radius: default_node_radius(),
            background: default_background(),
        }
    }
}

impl FlowStyle {
    pub fn end_cap(&self) -> Cap {
        match self.cap {
            CapKind::Arrow => Cap::Arrow(Arrowhead::symmetric(self.arrow_length, self.arrow_width)),
            CapKind::Disc => Cap::Disc(Disc::new(self.disc_diameter)),
        }
    }

    pub fn sizing(&self) -> Sizing {
        Sizing {
            corner_radius: self.corner_radius,
            width_scale: self.width_scale,
        }
    }
}

impl Scene {
    pub fn from_toml(content: &str) -> Result<Self> {
        let scene: Scene = toml::from_str(content)?;
        Ok(scene.measured())
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let scene: Scene = serde_yaml::from_str(content)?;
        Ok(scene.measured())
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(content)?;
        Ok(scene.measured())
    }

    /// Parses a document of unknown format, trying TOML, then YAML, then JSON.
    pub fn from_unknown(content: &str, origin: &str) -> Result<Self> {
        let attempts: [(&str, fn(&str) -> Result<Self>); 3] = [
            ("toml", Self::from_toml),
            ("yaml", Self::from_yaml),
            ("json", Self::from_json),
        ];
        for (format, parse) in attempts {
            match parse(content) {
                Ok(scene) => {
                    debug!("{origin}: parsed as {format}");
                    return Ok(scene);
                }
                Err(err) => debug!("{origin}: not {format}: {err}"),
            }
        }
        Err(Error::UnknownFormat(origin.to_string()))
    }

    /// Loads a scene file, picking the parser from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let parse: fn(&str) -> Result<Self> = match ext.as_str() {
            "toml" => Self::from_toml,
            "yaml" | "yml" => Self::from_yaml,
            "json" => Self::from_json,
            _ => return Err(Error::UnknownFormat(path.display().to_string())),
        };
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse(&content)
    }

    /// Runs a measurement pass, replacing every anchor with the current
    /// node rectangles.
    pub fn measure(&mut self) {
        self.anchors.replace(self.nodes.measurements());
    }

    fn measured(mut self) -> Self {
        self.measure();
        self
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub fn connectors(&self) -> Vec<FlowConnector> {
        let connectors = derive_connectors(
            &self.anchors,
            &self.flows,
            self.max_magnitude,
            self.style.sizing(),
        );
        let usable_max = self.max_magnitude.is_some_and(|max| max > 0.0 && max.is_finite());
        if !connectors.is_empty() && !usable_max {
            warn!(
                "max_magnitude is {:?}; every flow will be drawn with width 0",
                self.max_magnitude
            );
        }
        connectors
    }

    /// Canvas size: explicit dimensions win, otherwise the far edges of the
    /// measured nodes.
    pub fn size(&self) -> (f32, f32) {
        let bounds = self.anchors.bounds();
        let width = self
            .canvas
            .width
            .or_else(|| bounds.map(|b| b.right()))
            .unwrap_or(0.0);
        let height = self
            .canvas
            .height
            .or_else(|| bounds.map(|b| b.bottom()))
            .unwrap_or(0.0);
        (width.max(0.0), height.max(0.0))
    }
}
