use serde::{Deserialize, Serialize};

use crate::core::types::LabelOrientation;
use crate::core::value_format::{DisplayUnits, ValueFormat};
use crate::error::{LayoutError, LayoutResult};

/// How multiple bars share the single bar track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapStyle {
    /// Full-height bars drawn over each other.
    #[default]
    Full,
    /// Segments laid end to end, grouped by sign.
    Stacked,
    /// The track split into one thin slice per bar.
    Edge,
    /// Concentric bars, each nested inside the previous one.
    Inside,
}

/// Which part of the element becomes the annotation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelInfo {
    /// `category + separator + " " + formatted value`.
    #[default]
    Auto,
    Category,
    Display,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisMode {
    #[default]
    None,
    /// Axis labelled with formatted domain values.
    Values,
    /// Axis labelled `0%..100%` independent of the domain.
    Percentage,
}

impl AxisMode {
    #[must_use]
    pub fn is_shown(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Connector/note style of annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnnotationStyle {
    #[default]
    Label,
    Callout,
    CalloutElbow,
    CalloutCurve,
    TextOnly,
}

impl AnnotationStyle {
    /// Extra stagger spacing reserved for the callout underline/curve.
    #[must_use]
    pub fn connector_clearance(self) -> f64 {
        match self {
            Self::Callout | Self::CalloutCurve => 10.0,
            Self::Label | Self::CalloutElbow | Self::TextOnly => 0.0,
        }
    }

    #[must_use]
    pub fn draws_connector(self) -> bool {
        !matches!(self, Self::TextOnly)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationSettings {
    pub stagger: bool,
    pub spacing: f64,
    pub separator: String,
    pub same_as_bar_color: bool,
    pub bar_height: f64,
    pub display_units: DisplayUnits,
    pub precision: Option<u32>,
    pub overlap_style: OverlapStyle,
    pub label_info: LabelInfo,
    pub hide_labels: bool,
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self {
            stagger: true,
            spacing: 20.0,
            separator: ":".to_owned(),
            same_as_bar_color: false,
            bar_height: 30.0,
            display_units: DisplayUnits::Auto,
            precision: None,
            overlap_style: OverlapStyle::Full,
            label_info: LabelInfo::Auto,
            hide_labels: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    pub mode: AxisMode,
    pub color: String,
    pub font_size: f64,
    pub font_family: String,
    pub bold: bool,
    pub manual_scale: bool,
    pub bar_min: Option<f64>,
    pub bar_max: Option<f64>,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            mode: AxisMode::None,
            color: "gray".to_owned(),
            font_size: 12.0,
            font_family: "Arial".to_owned(),
            bold: false,
            manual_scale: true,
            bar_min: None,
            bar_max: None,
        }
    }
}

/// Global annotation text style, used by points without `custom_format`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub all_text_top: bool,
    pub label_orientation: LabelOrientation,
    pub annotation_style: AnnotationStyle,
    pub font_size: f64,
    pub font_family: String,
    pub color: String,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            all_text_top: false,
            label_orientation: LabelOrientation::Auto,
            annotation_style: AnnotationStyle::Label,
            font_size: 12.0,
            font_family: "Arial".to_owned(),
            color: "gray".to_owned(),
        }
    }
}

/// User-facing chart settings, read-only for the duration of a layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub annotation: AnnotationSettings,
    pub axis: AxisSettings,
    pub text: TextSettings,
    /// Number format pattern of the measure (e.g. `"#,0.00"`).
    pub value_pattern: Option<String>,
}

impl ChartSettings {
    #[must_use]
    pub fn value_format(&self) -> ValueFormat {
        ValueFormat {
            pattern: self.value_pattern.clone(),
            precision: self.annotation.precision,
            display_units: self.annotation.display_units,
        }
    }

    pub fn validate(&self) -> LayoutResult<()> {
        let annotation = &self.annotation;
        if !annotation.bar_height.is_finite() || annotation.bar_height <= 0.0 {
            return Err(LayoutError::InvalidData(
                "bar height must be finite and > 0".to_owned(),
            ));
        }
        if !annotation.spacing.is_finite() || annotation.spacing < 0.0 {
            return Err(LayoutError::InvalidData(
                "annotation spacing must be finite and >= 0".to_owned(),
            ));
        }
        if annotation.precision.is_some_and(|precision| precision > 12) {
            return Err(LayoutError::InvalidData(
                "value precision must be <= 12".to_owned(),
            ));
        }

        for (name, size) in [
            ("axis font size", self.axis.font_size),
            ("text font size", self.text.font_size),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(LayoutError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        for (name, bound) in [("bar_min", self.axis.bar_min), ("bar_max", self.axis.bar_max)] {
            if bound.is_some_and(|value| !value.is_finite()) {
                return Err(LayoutError::InvalidData(format!(
                    "manual scale {name} must be finite"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.axis.bar_min, self.axis.bar_max) {
            if min >= max {
                return Err(LayoutError::InvalidData(
                    "manual scale bar_min must be < bar_max".to_owned(),
                ));
            }
        }

        Ok(())
    }
}

/// What to do with a data point whose value is not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvalidValuePolicy {
    /// Fail the whole pass; nothing is rendered.
    #[default]
    RejectDataset,
    /// Drop only the offending point.
    SkipPoint,
}

/// Engine-level limits and defaults, independent of user settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub max_points: usize,
    /// Horizontal plot padding used unless the axis shows formatted values.
    pub default_padding: f64,
    pub invalid_value_policy: InvalidValuePolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_points: 10_000,
            default_padding: 15.0,
            invalid_value_policy: InvalidValuePolicy::RejectDataset,
        }
    }
}

impl LayoutConfig {
    pub fn validate(self) -> LayoutResult<Self> {
        if !self.default_padding.is_finite() || self.default_padding < 0.0 {
            return Err(LayoutError::InvalidData(
                "default padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}
