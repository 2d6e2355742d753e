//! Rounded elbow connectors with arrow caps for energy-flow diagrams.
//!
//! A [`Scene`] holds the measured node rectangles and the signed flow
//! magnitudes; [`render_scene`] draws every connector between them.

pub mod error;
pub mod flow;
pub mod geometry;
pub mod raster;
pub mod scene;

pub use error::{Error, Result};
pub use flow::{render_document, render_scene};
pub use scene::Scene;
