use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::LayoutResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Pixel-space point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Pixel-space displacement from an anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

/// Side of the bar an annotation is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Top,
    #[default]
    Bottom,
}

/// Requested text alignment of an annotation.
///
/// `Auto` lets the layout flip alignment when the label would overflow the
/// plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOrientation {
    #[default]
    Auto,
    Left,
    Right,
}

/// Manual annotation overrides supplied by the host.
///
/// `x` is expressed in data units, the remaining fields in pixels. `None`
/// means "not overridden"; `Some(0.0)` is a real override to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualPosition {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub dx: Option<f64>,
    pub dy: Option<f64>,
}

impl ManualPosition {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.x.is_none() && self.y.is_none() && self.dx.is_none() && self.dy.is_none()
    }

    /// Name of the first override holding a NaN or infinite value.
    #[must_use]
    pub fn non_finite_field(self) -> Option<&'static str> {
        [("x", self.x), ("y", self.y), ("dx", self.dx), ("dy", self.dy)]
            .into_iter()
            .find(|(_, value)| value.is_some_and(|value| !value.is_finite()))
            .map(|(name, _)| name)
    }
}

/// One measure supplied by the host for a single layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub value: f64,
    pub category: String,
    /// Host-formatted value. When absent the engine formats `value` itself.
    #[serde(default)]
    pub formatted_value: Option<String>,
    /// Bar fill. When absent a categorical palette color is used.
    #[serde(default)]
    pub bar_color: Option<String>,
    pub label_color: String,
    pub font_family: String,
    pub font_size: f64,
    pub show_in_bar: bool,
    pub custom_format: bool,
    pub position: LabelPosition,
    pub label_orientation: LabelOrientation,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub manual: ManualPosition,
}

impl DataPoint {
    #[must_use]
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            value,
            category: category.into(),
            formatted_value: None,
            bar_color: None,
            label_color: "gray".to_owned(),
            font_family: "Arial".to_owned(),
            font_size: 12.0,
            show_in_bar: true,
            custom_format: false,
            position: LabelPosition::Bottom,
            label_orientation: LabelOrientation::Auto,
            highlight: false,
            manual: ManualPosition::default(),
        }
    }

    pub fn from_decimal(category: impl Into<String>, value: Decimal) -> LayoutResult<Self> {
        Ok(Self::new(category, decimal_to_f64(value, "value")?))
    }

    #[must_use]
    pub fn with_formatted_value(mut self, formatted: impl Into<String>) -> Self {
        self.formatted_value = Some(formatted.into());
        self
    }

    #[must_use]
    pub fn with_bar_color(mut self, color: impl Into<String>) -> Self {
        self.bar_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_show_in_bar(mut self, show_in_bar: bool) -> Self {
        self.show_in_bar = show_in_bar;
        self
    }

    /// Enables per-point text formatting and sets the label side.
    #[must_use]
    pub fn with_position(mut self, position: LabelPosition) -> Self {
        self.custom_format = true;
        self.position = position;
        self
    }

    /// Enables per-point text formatting with the given font and color.
    #[must_use]
    pub fn with_label_style(
        mut self,
        color: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f64,
    ) -> Self {
        self.custom_format = true;
        self.label_color = color.into();
        self.font_family = font_family.into();
        self.font_size = font_size;
        self
    }

    /// Enables per-point text formatting with an explicit orientation.
    #[must_use]
    pub fn with_label_orientation(mut self, orientation: LabelOrientation) -> Self {
        self.custom_format = true;
        self.label_orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    #[must_use]
    pub fn with_manual_position(mut self, manual: ManualPosition) -> Self {
        self.manual = manual;
        self
    }
}

/// Input of one layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSet {
    pub points: Vec<DataPoint>,
    /// Host is cross-filtering: bars without `highlight` are dimmed.
    #[serde(default)]
    pub cross_highlight: bool,
}

impl DataSet {
    #[must_use]
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self {
            points,
            cross_highlight: false,
        }
    }

    #[must_use]
    pub fn with_cross_highlight(mut self, cross_highlight: bool) -> Self {
        self.cross_highlight = cross_highlight;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
