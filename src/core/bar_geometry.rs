use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::element::GraphElement;
use crate::core::scale::LinearScale;
use crate::core::settings::OverlapStyle;

/// Smallest height of the innermost nested bar.
pub const MIN_NESTED_BAR_HEIGHT: f64 = 4.0;

/// Deterministic bar rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Shared inputs of every bar strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarFrame {
    pub scale: LinearScale,
    /// Value bars grow from, see `ScaleDomain::baseline`.
    pub baseline: f64,
    /// Left offset of the plot area.
    pub padding: f64,
    /// Top of the bar track.
    pub top: f64,
    pub bar_height: f64,
}

impl BarFrame {
    /// Horizontal extent of a bar growing from the baseline to `value`.
    fn span(&self, value: f64) -> (f64, f64) {
        let x = self.padding + self.scale.map(value.min(self.baseline));
        let width = (self.scale.map(value) - self.scale.map(self.baseline)).abs();
        (x, width)
    }
}

/// One bar in draw order; `element` indexes the slice passed to the strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBar {
    pub element: usize,
    pub rect: BarRect,
}

/// Bar arrangement contract shared by all overlap strategies.
///
/// Only elements with `show_in_bar` produce bars. The returned list is in
/// draw order: later bars paint over earlier ones.
pub trait BarLayout {
    fn compute_bar_geometry(&self, elements: &[GraphElement], frame: &BarFrame) -> Vec<PlacedBar>;
}

fn bar_indices(elements: &[GraphElement]) -> Vec<usize> {
    elements
        .iter()
        .enumerate()
        .filter(|(_, element)| element.show_in_bar)
        .map(|(index, _)| index)
        .collect()
}

/// Full-height bars over each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullBars;

impl BarLayout for FullBars {
    fn compute_bar_geometry(&self, elements: &[GraphElement], frame: &BarFrame) -> Vec<PlacedBar> {
        // Negatives ascending, then non-negatives descending: within each sign
        // the bar closest to the baseline is painted last and stays visible.
        let (mut negative, mut positive): (Vec<usize>, Vec<usize>) = bar_indices(elements)
            .into_iter()
            .partition(|&index| elements[index].value < 0.0);
        negative.sort_by_key(|&index| OrderedFloat(elements[index].value));
        positive.sort_by_key(|&index| std::cmp::Reverse(OrderedFloat(elements[index].value)));

        negative
            .into_iter()
            .chain(positive)
            .map(|index| {
                let (x, width) = frame.span(elements[index].value);
                PlacedBar {
                    element: index,
                    rect: BarRect {
                        x,
                        y: frame.top,
                        width,
                        height: frame.bar_height,
                    },
                }
            })
            .collect()
    }
}

/// Segments laid end to end along the axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackedBars;

impl BarLayout for StackedBars {
    fn compute_bar_geometry(&self, elements: &[GraphElement], frame: &BarFrame) -> Vec<PlacedBar> {
        bar_indices(elements)
            .into_iter()
            .map(|index| {
                let element = &elements[index];
                let start = element
                    .stacked
                    .map_or(element.value.min(frame.baseline), |segment| segment.offset);
                let width =
                    (frame.scale.map(element.value) - frame.scale.map(frame.baseline)).abs();
                PlacedBar {
                    element: index,
                    rect: BarRect {
                        x: frame.padding + frame.scale.map(start),
                        y: frame.top,
                        width,
                        height: frame.bar_height,
                    },
                }
            })
            .collect()
    }
}

/// The track split into equal horizontal slices, one per bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeBars;

impl EdgeBars {
    #[must_use]
    pub fn slice_height(bar_height: f64, bar_count: usize) -> f64 {
        if bar_count == 0 {
            return bar_height;
        }
        bar_height / bar_count as f64
    }
}

impl BarLayout for EdgeBars {
    fn compute_bar_geometry(&self, elements: &[GraphElement], frame: &BarFrame) -> Vec<PlacedBar> {
        let indices = bar_indices(elements);
        let slice = Self::slice_height(frame.bar_height, indices.len());
        indices
            .into_iter()
            .enumerate()
            .map(|(slot, index)| {
                let (x, width) = frame.span(elements[index].value);
                PlacedBar {
                    element: index,
                    rect: BarRect {
                        x,
                        y: frame.top + slice * slot as f64,
                        width,
                        height: slice,
                    },
                }
            })
            .collect()
    }
}

/// Concentric bars, each vertically centered inside the previous one.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsideBars;

impl InsideBars {
    /// Heights of `count` nested bars, outermost first.
    ///
    /// The first bar uses the full track height and the last one
    /// `max(bar_height / count, MIN_NESTED_BAR_HEIGHT)`, never taller than the
    /// track; bars in between shrink by a constant interval.
    #[must_use]
    pub fn nested_heights(bar_height: f64, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        let smallest = (bar_height / count as f64)
            .max(MIN_NESTED_BAR_HEIGHT)
            .min(bar_height);
        let interval = if count > 1 {
            (bar_height - smallest) / (count - 1) as f64
        } else {
            0.0
        };

        (0..count)
            .map(|slot| {
                if slot == 0 {
                    bar_height
                } else if slot == count - 1 {
                    smallest
                } else {
                    bar_height - interval * slot as f64
                }
            })
            .collect()
    }
}

impl BarLayout for InsideBars {
    fn compute_bar_geometry(&self, elements: &[GraphElement], frame: &BarFrame) -> Vec<PlacedBar> {
        let indices = bar_indices(elements);
        let heights = Self::nested_heights(frame.bar_height, indices.len());
        indices
            .into_iter()
            .zip(heights)
            .map(|(index, height)| {
                let (x, width) = frame.span(elements[index].value);
                PlacedBar {
                    element: index,
                    rect: BarRect {
                        x,
                        y: frame.top + (frame.bar_height - height) / 2.0,
                        width,
                        height,
                    },
                }
            })
            .collect()
    }
}

impl OverlapStyle {
    /// Bar strategy implementing this overlap style.
    #[must_use]
    pub fn bar_layout(self) -> &'static dyn BarLayout {
        match self {
            Self::Full => &FullBars,
            Self::Stacked => &StackedBars,
            Self::Edge => &EdgeBars,
            Self::Inside => &InsideBars,
        }
    }
}

/// Fill opacity of a bar; cross-highlighting dims bars that are not highlighted.
#[must_use]
pub fn bar_opacity(cross_highlight: bool, highlighted: bool) -> f64 {
    if cross_highlight && !highlighted {
        DIMMED_BAR_OPACITY
    } else {
        1.0
    }
}

pub const DIMMED_BAR_OPACITY: f64 = 0.1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_heights_for_three_bars() {
        let heights = InsideBars::nested_heights(40.0, 3);
        assert_eq!(heights.len(), 3);
        assert_eq!(heights[0], 40.0);
        assert!((heights[1] - 80.0 / 3.0).abs() <= 1e-9);
        assert!((heights[2] - 40.0 / 3.0).abs() <= 1e-9);
    }

    #[test]
    fn nested_heights_respect_minimum_floor() {
        let heights = InsideBars::nested_heights(20.0, 10);
        assert_eq!(heights[9], MIN_NESTED_BAR_HEIGHT);
        assert!(heights.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn nested_floor_never_exceeds_a_short_track() {
        let heights = InsideBars::nested_heights(3.0, 2);
        assert_eq!(heights, vec![3.0, 3.0]);
        assert!(heights.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn single_nested_bar_uses_full_height() {
        assert_eq!(InsideBars::nested_heights(30.0, 1), vec![30.0]);
    }

    #[test]
    fn opacity_dims_only_under_cross_highlight() {
        assert_eq!(bar_opacity(false, false), 1.0);
        assert_eq!(bar_opacity(true, true), 1.0);
        assert_eq!(bar_opacity(true, false), DIMMED_BAR_OPACITY);
    }
}
