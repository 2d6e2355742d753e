use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::cap::EndCap;
use super::connector::Connector;
use super::decorate::{DecoratedConnector, decorate};
use crate::geometry::{Direction, Rect, Side};

/// Nominal elbow radius of the flow diagram
pub const CORNER_RADIUS: f32 = 30.0;

/// Line width of a flow running at the maximum magnitude
pub const WIDTH_SCALE: f32 = 30.0;

/// The nodes of an energy-flow diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Source,
    Storage,
    Grid,
    Load,
}

impl NodeId {
    pub const ALL: [NodeId; 4] = [NodeId::Source, NodeId::Storage, NodeId::Grid, NodeId::Load];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeId::Source => "source",
            NodeId::Storage => "storage",
            NodeId::Grid => "grid",
            NodeId::Load => "load",
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The most recent measured rectangle of every node.
///
/// Each measurement pass replaces the whole set; nothing from an earlier
/// pass survives a newer one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorSet {
    rects: HashMap<NodeId, Rect>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every anchor with the given measurements. Duplicate keys:
    /// the last one wins.
    pub fn replace<I>(&mut self, measurements: I)
    where
        I: IntoIterator<Item = (NodeId, Rect)>,
    {
        self.rects = measurements.into_iter().collect();
    }

    pub fn get(&self, node: NodeId) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Anchors in [`NodeId`] order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        NodeId::ALL
            .into_iter()
            .filter_map(|id| self.get(id).map(|rect| (id, rect)))
    }

    /// Bounding box of all measured nodes.
    pub fn bounds(&self) -> Option<Rect> {
        self.iter()
            .map(|(_, rect)| rect)
            .reduce(|acc, rect| acc.union(&rect))
    }
}

impl FromIterator<(NodeId, Rect)> for AnchorSet {
    fn from_iter<I: IntoIterator<Item = (NodeId, Rect)>>(iter: I) -> Self {
        let mut anchors = AnchorSet::new();
        anchors.replace(iter);
        anchors
    }
}

/// The directed connectors of the diagram.
///
/// Endpoints and first-leg direction are fixed per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowEdge {
    SourceToStorage,
    SourceToGrid,
    SourceToLoad,
    StorageToGrid,
    StorageToLoad,
    GridToLoad,
}

impl FlowEdge {
    pub const ALL: [FlowEdge; 6] = [
        FlowEdge::SourceToStorage,
        FlowEdge::SourceToGrid,
        FlowEdge::SourceToLoad,
        FlowEdge::StorageToGrid,
        FlowEdge::StorageToLoad,
        FlowEdge::GridToLoad,
    ];

    /// Node and side the connector leaves from.
    pub fn from(self) -> (NodeId, Side) {
        match self {
            FlowEdge::SourceToStorage => (NodeId::Source, Side::Left),
            FlowEdge::SourceToGrid => (NodeId::Source, Side::Right),
            FlowEdge::SourceToLoad => (NodeId::Source, Side::Bottom),
            FlowEdge::StorageToGrid => (NodeId::Storage, Side::Right),
            FlowEdge::StorageToLoad => (NodeId::Storage, Side::Bottom),
            FlowEdge::GridToLoad => (NodeId::Grid, Side::Bottom),
        }
    }

    /// Node and side the connector arrives at.
    pub fn to(self) -> (NodeId, Side) {
        match self {
            FlowEdge::SourceToStorage => (NodeId::Storage, Side::Top),
            FlowEdge::SourceToGrid => (NodeId::Grid, Side::Top),
            FlowEdge::SourceToLoad => (NodeId::Load, Side::Top),
            FlowEdge::StorageToGrid => (NodeId::Grid, Side::Left),
            FlowEdge::StorageToLoad => (NodeId::Load, Side::Left),
            FlowEdge::GridToLoad => (NodeId::Load, Side::Right),
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            FlowEdge::SourceToStorage | FlowEdge::SourceToGrid | FlowEdge::StorageToGrid => {
                Direction::Horizontal
            }
            FlowEdge::SourceToLoad | FlowEdge::StorageToLoad | FlowEdge::GridToLoad => {
                Direction::Vertical
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlowEdge::SourceToStorage => "source_to_storage",
            FlowEdge::SourceToGrid => "source_to_grid",
            FlowEdge::SourceToLoad => "source_to_load",
            FlowEdge::StorageToGrid => "storage_to_grid",
            FlowEdge::StorageToLoad => "storage_to_load",
            FlowEdge::GridToLoad => "grid_to_load",
        }
    }
}

impl fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed magnitude per edge; positive flows run from `from` to `to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flows {
    pub source_to_storage: f32,
    pub source_to_grid: f32,
    pub source_to_load: f32,
    pub storage_to_grid: f32,
    pub storage_to_load: f32,
    pub grid_to_load: f32,
}

impl Flows {
    pub fn magnitude(&self, edge: FlowEdge) -> f32 {
        match edge {
            FlowEdge::SourceToStorage => self.source_to_storage,
            FlowEdge::SourceToGrid => self.source_to_grid,
            FlowEdge::SourceToLoad => self.source_to_load,
            FlowEdge::StorageToGrid => self.storage_to_grid,
            FlowEdge::StorageToLoad => self.storage_to_load,
            FlowEdge::GridToLoad => self.grid_to_load,
        }
    }
}

/// `|magnitude| / max`, or 0 when `max` is missing, zero or unusable.
///
/// Saturates at `f32::MAX`, so infinite magnitudes still map to the widest
/// line. A NaN magnitude maps to 0.
pub fn normalized_magnitude(magnitude: f32, max_magnitude: Option<f32>) -> f32 {
    match max_magnitude {
        Some(max) if max > 0.0 && max.is_finite() && !magnitude.is_nan() => {
            (magnitude / max).abs().min(f32::MAX)
        }
        _ => 0.0,
    }
}

/// Line width for a magnitude, log-compressed: `log2(n + 1) * scale`.
///
/// Maps 0 to 0, reaches `scale` at the maximum and keeps growing slowly
/// beyond it.
pub fn scaled_line_width(magnitude: f32, max_magnitude: Option<f32>, scale: f32) -> f32 {
    (normalized_magnitude(magnitude, max_magnitude) + 1.0).log2() * scale
}

/// [`scaled_line_width`] with the diagram's standard [`WIDTH_SCALE`].
pub fn line_width_for_magnitude(magnitude: f32, max_magnitude: Option<f32>) -> f32 {
    scaled_line_width(magnitude, max_magnitude, WIDTH_SCALE)
}

/// Which end of a connector carries the cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapEnd {
    Start,
    End,
}

impl CapEnd {
    /// Positive flows point at the end, negative ones back at the start;
    /// zero (or NaN) flows get no cap.
    pub fn for_magnitude(magnitude: f32) -> Option<CapEnd> {
        if magnitude > 0.0 {
            Some(CapEnd::End)
        } else if magnitude < 0.0 {
            Some(CapEnd::Start)
        } else {
            None
        }
    }
}

/// Geometry settings shared by all connectors of a diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    pub corner_radius: f32,
    pub width_scale: f32,
}

impl Default for Sizing {
    fn default() -> Self {
        Self {
            corner_radius: CORNER_RADIUS,
            width_scale: WIDTH_SCALE,
        }
    }
}

/// One edge of the diagram resolved against measured anchors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConnector {
    pub edge: FlowEdge,
    pub connector: Connector,
    pub magnitude: f32,
    pub cap_end: Option<CapEnd>,
}

impl FlowConnector {
    pub fn decorate(&self, cap: &dyn EndCap) -> DecoratedConnector {
        match self.cap_end {
            Some(CapEnd::Start) => decorate(&self.connector, Some(cap), None),
            Some(CapEnd::End) => decorate(&self.connector, None, Some(cap)),
            None => decorate(&self.connector, None, None),
        }
    }
}

/// Resolves every edge whose two nodes have been measured.
///
/// Edges touching an unmeasured node are skipped entirely; that is the
/// normal state before the first layout pass.
pub fn derive_connectors(
    anchors: &AnchorSet,
    flows: &Flows,
    max_magnitude: Option<f32>,
    sizing: Sizing,
) -> Vec<FlowConnector> {
    let mut connectors = Vec::with_capacity(FlowEdge::ALL.len());

    for edge in FlowEdge::ALL {
        let (from_node, from_side) = edge.from();
        let (to_node, to_side) = edge.to();

        let (Some(from), Some(to)) = (anchors.get(from_node), anchors.get(to_node)) else {
            debug!("skipping {edge}: {from_node} or {to_node} has not been measured");
            continue;
        };

        let magnitude = flows.magnitude(edge);
        let line_width = scaled_line_width(magnitude, max_magnitude, sizing.width_scale);
        let connector = Connector::new(from.edge_center(from_side), to.edge_center(to_side))
            .with_radius(sizing.corner_radius)
            .with_direction(edge.direction())
            .with_line_width(line_width);
        let cap_end = CapEnd::for_magnitude(magnitude);

        trace!(
            "{edge}: {:?} -> {:?}, width {line_width:.2}, cap {cap_end:?}",
            connector.start, connector.end
        );

        connectors.push(FlowConnector {
            edge,
            connector,
            magnitude,
            cap_end,
        });
    }

    connectors
}
