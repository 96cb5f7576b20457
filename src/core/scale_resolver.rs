use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::element::GraphElement;
use crate::core::scale::LinearScale;
use crate::core::settings::{AxisMode, AxisSettings, OverlapStyle};
use crate::core::text_metrics::TextMetrics;
use crate::core::value_format::{ValueFormat, ValueFormatter};
use crate::error::LayoutResult;

/// Resolved value domain of the bar axis.
///
/// `min <= 0 <= max` is not guaranteed: manual bounds may exclude zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleDomain {
    pub min: f64,
    pub max: f64,
}

impl ScaleDomain {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Value bars grow from.
    ///
    /// Zero when the domain spans it, otherwise the domain edge closest to zero.
    #[must_use]
    pub fn baseline(self) -> f64 {
        if self.max >= 0.0 {
            self.min.max(0.0)
        } else {
            self.max.min(0.0)
        }
    }
}

/// Data-derived bounds used when no manual override applies.
///
/// Stacked mode spans the independent positive and negative sums, rounded
/// outward to whole units; other modes span `[min(0, min), max]`.
#[must_use]
pub fn conditional_bounds(elements: &[GraphElement], style: OverlapStyle) -> ScaleDomain {
    if elements.is_empty() {
        return ScaleDomain::default();
    }

    match style {
        OverlapStyle::Stacked => {
            let (negative, positive) =
                elements
                    .iter()
                    .fold((0.0_f64, 0.0_f64), |(negative, positive), element| {
                        if element.value < 0.0 {
                            (negative + element.value, positive)
                        } else {
                            (negative, positive + element.value)
                        }
                    });
            // Negative sums round away from zero so the lowest segment stays in range.
            let min = if negative < 0.0 {
                -(-negative).ceil()
            } else {
                0.0
            };
            ScaleDomain::new(min, positive.ceil())
        }
        OverlapStyle::Full | OverlapStyle::Edge | OverlapStyle::Inside => {
            let (min, max) = elements.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(min, max), element| (min.min(element.value), max.max(element.value)),
            );
            ScaleDomain::new(min.min(0.0), max)
        }
    }
}

/// Applies manual axis bounds on top of the conditional ones.
///
/// Stacked layouts always use the conditional bounds. Each manual bound that
/// is unset falls back to its conditional counterpart independently.
#[must_use]
pub fn resolve_domain(
    conditional: ScaleDomain,
    style: OverlapStyle,
    axis: &AxisSettings,
) -> ScaleDomain {
    if !axis.manual_scale || style == OverlapStyle::Stacked {
        return conditional;
    }
    ScaleDomain::new(
        axis.bar_min.unwrap_or(conditional.min),
        axis.bar_max.unwrap_or(conditional.max),
    )
}

/// Horizontal padding of the plot area.
///
/// An axis with formatted value labels needs half of its widest boundary
/// label on each side so the labels are not clipped.
#[must_use]
pub fn resolve_padding(
    domain: ScaleDomain,
    axis: &AxisSettings,
    value_format: &ValueFormat,
    default_padding: f64,
    metrics: &dyn TextMetrics,
    formatter: &dyn ValueFormatter,
) -> f64 {
    if axis.mode != AxisMode::Values {
        return default_padding;
    }

    let widths: SmallVec<[f64; 2]> = [domain.min, domain.max]
        .into_iter()
        .map(|bound| {
            let label = formatter.format(bound, value_format);
            metrics
                .measure(&label, &axis.font_family, axis.font_size)
                .width
        })
        .collect();
    widths.into_iter().fold(0.0, f64::max) / 2.0
}

/// Builds the value → pixel scale over `[0, chart_width - 2 * padding]`.
pub fn build_scale(domain: ScaleDomain, chart_width: f64, padding: f64) -> LayoutResult<LinearScale> {
    LinearScale::new(domain.min, domain.max, chart_width - padding * 2.0)
}

/// Keeps elements whose effective value lies inside `domain`.
///
/// Returns the survivors and the number of dropped elements.
#[must_use]
pub fn retain_in_domain(
    elements: Vec<GraphElement>,
    domain: ScaleDomain,
) -> (Vec<GraphElement>, usize) {
    let before = elements.len();
    let kept: Vec<GraphElement> = elements
        .into_iter()
        .filter(|element| domain.contains(element.effective_value()))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}
