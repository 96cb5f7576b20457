use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::bar_geometry::{EdgeBars, PlacedBar};
use crate::core::element::GraphElement;
use crate::core::margins::Margins;
use crate::core::scale::LinearScale;
use crate::core::settings::OverlapStyle;
use crate::core::types::{LabelOrientation, Offset, Point};

/// Vertical offset of an unstaggered top annotation.
pub const TOP_NOTE_OFFSET: f64 = -20.0;
/// Vertical offset of an unstaggered bottom annotation without an axis.
pub const BOTTOM_NOTE_OFFSET: f64 = 20.0;
/// Extra room below the bar taken by a visible axis.
pub const AXIS_CLEARANCE: f64 = 20.0;

/// Resolved text alignment of an annotation relative to its note point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelAlign {
    /// Text starts at the note point and runs right.
    Left,
    /// Text ends at the note point.
    Right,
}

/// Remaining top/bottom annotations during placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StaggerCounters {
    pub top: usize,
    pub bottom: usize,
}

impl StaggerCounters {
    #[must_use]
    pub fn for_elements(elements: &[GraphElement]) -> Self {
        let top = elements.iter().filter(|element| element.top).count();
        Self {
            top,
            bottom: elements.len() - top,
        }
    }

    #[must_use]
    pub fn is_exhausted(self) -> bool {
        self.top == 0 && self.bottom == 0
    }

    fn take(&mut self, top: bool) {
        let bucket = if top { &mut self.top } else { &mut self.bottom };
        *bucket = bucket.saturating_sub(1);
    }
}

/// Inputs shared by every annotation in one pass.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationFrame<'a> {
    pub scale: LinearScale,
    pub padding: f64,
    /// `chart_width - 2 * padding`; labels crossing it flip alignment.
    pub plot_width: f64,
    pub margins: Margins,
    pub bar_height: f64,
    pub stagger: bool,
    pub axis_shown: bool,
    pub style: OverlapStyle,
    /// Bars in draw order, as returned by the overlap strategy.
    pub bars: &'a [PlacedBar],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationPlacement {
    /// Index into the element slice.
    pub element: usize,
    pub anchor: Point,
    pub offset: Offset,
    pub align: LabelAlign,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationPass {
    /// Placements in visit order.
    pub placements: Vec<AnnotationPlacement>,
    /// Counters after the pass; exhausted when every element was visited.
    pub counters: StaggerCounters,
}

/// Visit order of annotations for `style`.
///
/// Stacked visits non-negative elements in their given order and then the
/// negative ones ascending; edge visits in reverse; others keep the order.
#[must_use]
pub fn annotation_order(elements: &[GraphElement], style: OverlapStyle) -> Vec<usize> {
    match style {
        OverlapStyle::Stacked => {
            let (mut negative, positive): (Vec<usize>, Vec<usize>) =
                (0..elements.len()).partition(|&index| elements[index].value < 0.0);
            negative.sort_by_key(|&index| OrderedFloat(elements[index].value));
            positive.into_iter().chain(negative).collect()
        }
        OverlapStyle::Edge => (0..elements.len()).rev().collect(),
        OverlapStyle::Full | OverlapStyle::Inside => (0..elements.len()).collect(),
    }
}

/// Resolves `Auto` orientation: flip to right-aligned when the text would
/// run past the plot width.
#[must_use]
pub fn resolve_align(
    orientation: LabelOrientation,
    x: f64,
    text_width: f64,
    plot_width: f64,
) -> LabelAlign {
    match orientation {
        LabelOrientation::Left => LabelAlign::Left,
        LabelOrientation::Right => LabelAlign::Right,
        LabelOrientation::Auto => {
            if text_width + x > plot_width {
                LabelAlign::Right
            } else {
                LabelAlign::Left
            }
        }
    }
}

fn default_vertical(
    top: bool,
    frame: &AnnotationFrame<'_>,
    counters: StaggerCounters,
) -> (f64, f64) {
    let track_top = frame.margins.bar_top(frame.stagger);
    let track_bottom = track_top + frame.bar_height;

    match (frame.stagger, top) {
        (false, true) => (track_top, TOP_NOTE_OFFSET),
        (false, false) => {
            let dy = if frame.axis_shown {
                BOTTOM_NOTE_OFFSET + AXIS_CLEARANCE
            } else {
                BOTTOM_NOTE_OFFSET
            };
            (track_bottom, dy)
        }
        (true, true) => (track_top, -frame.margins.spacing * counters.top as f64),
        (true, false) => {
            let dy = frame.margins.spacing * counters.bottom as f64;
            let dy = if frame.axis_shown {
                dy + AXIS_CLEARANCE
            } else {
                dy
            };
            (track_bottom, dy)
        }
    }
}

/// Edge mode anchors at the element's own slice; the note point stays where
/// the default placement puts it.
fn edge_vertical(
    top: bool,
    slot: Option<usize>,
    frame: &AnnotationFrame<'_>,
    (default_y, default_dy): (f64, f64),
) -> (f64, f64) {
    let track_top = frame.margins.bar_top(frame.stagger);
    let slice = EdgeBars::slice_height(frame.bar_height, frame.bars.len());

    match (slot, top) {
        (Some(slot), true) => {
            let from_top = slice * slot as f64;
            (track_top + from_top, default_dy - from_top)
        }
        (Some(slot), false) => {
            let from_top = slice * (slot + 1) as f64;
            (
                track_top + from_top,
                default_dy + frame.bar_height - from_top,
            )
        }
        (None, true) => (
            track_top + frame.bar_height,
            default_dy - frame.bar_height,
        ),
        (None, false) => (default_y, default_dy),
    }
}

/// Places every annotation, consuming the stagger counters.
///
/// Each visited element decrements its bucket, so the last element placed in
/// a bucket ends up closest to the bar.
#[must_use]
pub fn place_annotations(elements: &[GraphElement], frame: &AnnotationFrame<'_>) -> AnnotationPass {
    let mut counters = StaggerCounters::for_elements(elements);
    let mut placements = Vec::with_capacity(elements.len());

    for index in annotation_order(elements, frame.style) {
        let element = &elements[index];
        let x = frame.padding + frame.scale.map(element.anchor_value());
        let align = resolve_align(
            element.label_orientation,
            x,
            element.text.width,
            frame.plot_width,
        );

        let default = default_vertical(element.top, frame, counters);
        let (y, dy) = if frame.style == OverlapStyle::Edge {
            let slot = frame.bars.iter().position(|bar| bar.element == index);
            edge_vertical(element.top, slot, frame, default)
        } else {
            default
        };

        placements.push(AnnotationPlacement {
            element: index,
            anchor: Point {
                x,
                y: element.manual.y.unwrap_or(y),
            },
            offset: Offset {
                dx: element.manual.dx.unwrap_or(0.0),
                dy: element.manual.dy.unwrap_or(dy),
            },
            align,
        });
        counters.take(element.top);
    }

    AnnotationPass {
        placements,
        counters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_flip_uses_strict_inequality() {
        let plot_width = 200.0 - 2.0 * 10.0;
        assert_eq!(
            resolve_align(LabelOrientation::Auto, 100.0, 80.0, plot_width),
            LabelAlign::Left
        );
        assert_eq!(
            resolve_align(LabelOrientation::Auto, 100.5, 80.0, plot_width),
            LabelAlign::Right
        );
    }

    #[test]
    fn explicit_orientation_wins() {
        assert_eq!(
            resolve_align(LabelOrientation::Left, 500.0, 80.0, 100.0),
            LabelAlign::Left
        );
        assert_eq!(
            resolve_align(LabelOrientation::Right, 0.0, 1.0, 100.0),
            LabelAlign::Right
        );
    }
}
