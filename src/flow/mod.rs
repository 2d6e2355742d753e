//! Connector geometry for energy-flow diagrams.
//!
//! [`connector`] turns two anchor points into an elbowed path, [`cap`]
//! describes the shapes drawn at either end, [`decorate`] puts the two
//! together and [`anchors`] wires the fixed diagram edges to measured node
//! rectangles.

pub mod anchors;
pub mod cap;
pub mod connector;
pub mod decorate;
pub mod render;

pub use anchors::{
    AnchorSet, CORNER_RADIUS, CapEnd, FlowConnector, FlowEdge, Flows, NodeId, Sizing,
    WIDTH_SCALE, derive_connectors, line_width_for_magnitude, normalized_magnitude,
    scaled_line_width,
};
pub use cap::{Arrowhead, Cap, Disc, EndCap};
pub use connector::{Connector, Elbow, connector_path};
pub use decorate::{DecoratedConnector, decorate, decorated_connector};
pub use render::{Surface, SvgSurface, render_document, render_scene};
