//! annotated-bar: deterministic layout engine for annotated bar charts.
//!
//! The `core` module turns a data set and settings into pixel geometry (bars,
//! annotation anchors and offsets, axis) without touching any drawing
//! surface. `api` wraps it in an update driver that feeds a [`render::Renderer`]
//! and notifies [`extensions::ChartPlugin`] observers.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::AnnotatedBarChart;
pub use crate::core::{ChartLayout, ChartSettings, DataPoint, DataSet, LayoutEngine, Viewport};
pub use error::{LayoutError, LayoutResult};
