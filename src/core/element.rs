#[cfg(feature = "parallel-measurement")]
use rayon::prelude::*;

use ordered_float::OrderedFloat;

use crate::core::primitives::default_bar_color;
use crate::core::settings::{ChartSettings, LabelInfo};
use crate::core::text_metrics::{TextExtent, TextMetrics};
use crate::core::types::{DataPoint, LabelOrientation, LabelPosition, ManualPosition};
use crate::core::value_format::ValueFormatter;

/// Signed cumulative placement of one stacked segment.
///
/// `cumulative` is the running sum of same-signed values up to and including
/// this element; `offset` is where the segment starts on the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedSegment {
    pub offset: f64,
    pub cumulative: f64,
}

/// Per-pass, fully style-resolved view of one data point.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphElement {
    /// Index of the source point in the host's data set.
    pub source_index: usize,
    pub category: String,
    pub value: f64,
    pub display: String,
    pub bar_color: String,
    pub show_in_bar: bool,
    pub annotation_color: String,
    pub font_family: String,
    pub font_size: f64,
    pub label_orientation: LabelOrientation,
    pub top: bool,
    pub highlight: bool,
    pub annotation_text: String,
    pub text: TextExtent,
    pub manual: ManualPosition,
    pub stacked: Option<StackedSegment>,
}

impl GraphElement {
    /// Value checked against the scale domain: the segment end when stacked.
    #[must_use]
    pub fn effective_value(&self) -> f64 {
        self.stacked.map_or(self.value, |segment| segment.cumulative)
    }

    /// Data value the annotation points at.
    ///
    /// Manual `x` wins; stacked segments are annotated at their midpoint.
    #[must_use]
    pub fn anchor_value(&self) -> f64 {
        if let Some(x) = self.manual.x {
            return x;
        }
        self.stacked
            .map_or(self.value, |segment| segment.cumulative - self.value / 2.0)
    }
}

fn resolve_element(
    source_index: usize,
    point: &DataPoint,
    settings: &ChartSettings,
    formatter: &dyn ValueFormatter,
) -> GraphElement {
    let text_settings = &settings.text;
    let annotation_settings = &settings.annotation;

    let (label_color, font_family, font_size, label_orientation, top) = if point.custom_format {
        (
            point.label_color.clone(),
            point.font_family.clone(),
            point.font_size,
            point.label_orientation,
            point.position == LabelPosition::Top,
        )
    } else {
        (
            text_settings.color.clone(),
            text_settings.font_family.clone(),
            text_settings.font_size,
            text_settings.label_orientation,
            text_settings.all_text_top,
        )
    };

    let display = point
        .formatted_value
        .clone()
        .unwrap_or_else(|| formatter.format(point.value, &settings.value_format()));
    let bar_color = point
        .bar_color
        .clone()
        .unwrap_or_else(|| default_bar_color(source_index).to_owned());
    let annotation_color = if annotation_settings.same_as_bar_color && point.show_in_bar {
        bar_color.clone()
    } else {
        label_color
    };
    let annotation_text = match annotation_settings.label_info {
        LabelInfo::Auto => format!(
            "{}{} {}",
            point.category, annotation_settings.separator, display
        ),
        LabelInfo::Category => point.category.clone(),
        LabelInfo::Display => display.clone(),
    };

    GraphElement {
        source_index,
        category: point.category.clone(),
        value: point.value,
        display,
        bar_color,
        show_in_bar: point.show_in_bar,
        annotation_color,
        font_family,
        font_size,
        label_orientation,
        top,
        highlight: point.highlight,
        annotation_text,
        text: TextExtent::default(),
        manual: point.manual,
        stacked: None,
    }
}

fn measure_elements(elements: &mut [GraphElement], metrics: &dyn TextMetrics) {
    // Large inputs measure in parallel; results are identical either way.
    #[cfg(feature = "parallel-measurement")]
    {
        elements.par_iter_mut().for_each(|element| {
            element.text =
                metrics.measure(&element.annotation_text, &element.font_family, element.font_size);
        });
    }

    #[cfg(not(feature = "parallel-measurement"))]
    {
        for element in elements.iter_mut() {
            element.text =
                metrics.measure(&element.annotation_text, &element.font_family, element.font_size);
        }
    }
}

/// Assigns stacked segments over elements sorted by ascending value.
///
/// Positive and negative values accumulate independently, so each segment
/// only stacks on same-signed predecessors.
pub fn assign_stacked_segments(elements: &mut [GraphElement]) {
    let mut positive_sum = 0.0;
    let mut negative_sum = 0.0;
    for element in elements.iter_mut() {
        let value = element.value;
        let cumulative = if value >= 0.0 {
            positive_sum += value;
            positive_sum
        } else {
            negative_sum += value;
            negative_sum
        };
        let offset = if value > 0.0 {
            cumulative - value
        } else {
            cumulative
        };
        element.stacked = Some(StackedSegment { offset, cumulative });
    }
}

/// Builds measured graph elements, sorted by ascending value.
///
/// `points` pairs each accepted point with its index in the host data set.
pub fn build_elements(
    points: &[(usize, &DataPoint)],
    settings: &ChartSettings,
    metrics: &dyn TextMetrics,
    formatter: &dyn ValueFormatter,
) -> Vec<GraphElement> {
    let mut elements: Vec<GraphElement> = points
        .iter()
        .map(|(index, point)| resolve_element(*index, point, settings, formatter))
        .collect();
    elements.sort_by_key(|element| OrderedFloat(element.value));
    measure_elements(&mut elements, metrics);
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HeuristicTextMetrics;
    use crate::core::value_format::DefaultValueFormatter;

    fn elements_for(values: &[f64], settings: &ChartSettings) -> Vec<GraphElement> {
        let points: Vec<DataPoint> = values
            .iter()
            .enumerate()
            .map(|(i, value)| DataPoint::new(format!("c{i}"), *value))
            .collect();
        let indexed: Vec<(usize, &DataPoint)> = points.iter().enumerate().collect();
        build_elements(
            &indexed,
            settings,
            &HeuristicTextMetrics::default(),
            &DefaultValueFormatter,
        )
    }

    #[test]
    fn stacked_segments_only_accumulate_same_sign() {
        let mut elements = elements_for(&[5.0, -3.0, 2.0, -1.0], &ChartSettings::default());
        assign_stacked_segments(&mut elements);

        let segments: Vec<(f64, f64, f64)> = elements
            .iter()
            .map(|e| {
                let s = e.stacked.expect("segment");
                (e.value, s.offset, s.cumulative)
            })
            .collect();
        assert_eq!(
            segments,
            vec![
                (-3.0, -3.0, -3.0),
                (-1.0, -4.0, -4.0),
                (2.0, 0.0, 2.0),
                (5.0, 2.0, 7.0),
            ]
        );
    }

    #[test]
    fn global_style_applies_without_custom_format() {
        let mut settings = ChartSettings::default();
        settings.text.all_text_top = true;
        settings.text.color = "black".to_owned();
        let elements = elements_for(&[1.0], &settings);
        assert!(elements[0].top);
        assert_eq!(elements[0].annotation_color, "black");
        assert_eq!(elements[0].annotation_text, "c0: 1");
    }

    #[test]
    fn custom_format_uses_point_style() {
        let point = DataPoint::new("a", 1.0)
            .with_position(LabelPosition::Top)
            .with_label_style("red", "Georgia", 20.0);
        let mut settings = ChartSettings::default();
        settings.annotation.label_info = LabelInfo::Category;
        let elements = build_elements(
            &[(0, &point)],
            &settings,
            &HeuristicTextMetrics::default(),
            &DefaultValueFormatter,
        );
        let element = &elements[0];
        assert!(element.top);
        assert_eq!(element.annotation_color, "red");
        assert_eq!(element.font_family, "Georgia");
        assert_eq!(element.annotation_text, "a");
        assert!((element.text.height - 23.0).abs() <= 1e-9);
    }

    #[test]
    fn same_as_bar_color_only_for_points_in_bar() {
        let mut settings = ChartSettings::default();
        settings.annotation.same_as_bar_color = true;
        let shown = DataPoint::new("a", 1.0).with_bar_color("blue");
        let hidden = DataPoint::new("b", 2.0)
            .with_bar_color("green")
            .with_show_in_bar(false);
        let elements = build_elements(
            &[(0, &shown), (1, &hidden)],
            &settings,
            &HeuristicTextMetrics::default(),
            &DefaultValueFormatter,
        );
        assert_eq!(elements[0].annotation_color, "blue");
        assert_eq!(elements[1].annotation_color, "gray");
    }
}
