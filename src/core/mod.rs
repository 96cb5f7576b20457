pub mod annotation;
pub mod bar_geometry;
pub mod element;
pub mod layout;
pub mod margins;
pub mod primitives;
pub mod scale;
pub mod scale_resolver;
pub mod settings;
pub mod text_metrics;
pub mod types;
pub mod value_format;

pub use annotation::{AnnotationPlacement, LabelAlign, StaggerCounters};
pub use bar_geometry::{BarLayout, BarRect, EdgeBars, FullBars, InsideBars, StackedBars};
pub use element::GraphElement;
pub use layout::{AxisLayout, ChartLayout, ElementLayout, LayoutEngine, LayoutPhase};
pub use margins::Margins;
pub use scale::LinearScale;
pub use scale_resolver::ScaleDomain;
pub use settings::{
    AnnotationSettings, AnnotationStyle, AxisMode, AxisSettings, ChartSettings,
    InvalidValuePolicy, LabelInfo, LayoutConfig, OverlapStyle, TextSettings,
};
pub use text_metrics::{HeuristicTextMetrics, TextExtent, TextMetrics};
pub use types::{
    DataPoint, DataSet, LabelOrientation, LabelPosition, ManualPosition, Offset, Point, Viewport,
};
pub use value_format::{DefaultValueFormatter, DisplayUnits, ValueFormat, ValueFormatter};
