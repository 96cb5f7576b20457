//! Host-facing facade.
//!
//! [`AnnotatedBarChart`] owns the data set, settings and renderer, runs one
//! layout pass per [`AnnotatedBarChart::update`] and notifies plugins.

mod chart;
mod json_contract;
mod plugin_dispatch;
mod plugin_registry;
mod render_frame_builder;

pub use chart::AnnotatedBarChart;
pub use json_contract::{CHART_LAYOUT_JSON_SCHEMA_V1, ChartLayoutJsonContractV1};
pub use render_frame_builder::{CONNECTOR_STROKE_WIDTH, FALLBACK_COLOR, build_render_frame};

pub use crate::core::settings::{
    AnnotationSettings, AnnotationStyle, AxisMode, AxisSettings, ChartSettings,
    InvalidValuePolicy, LabelInfo, LayoutConfig, OverlapStyle, TextSettings,
};
pub use crate::extensions::{ChartPlugin, LayoutFailureKind, PluginContext, PluginEvent};
