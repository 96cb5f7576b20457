//! Layout orchestrator.
//!
//! One call to [`LayoutEngine::compute`] runs the whole pass
//! `Idle → Scanning → ScaleResolved → BarsBuilt → AnnotationsPlaced → Done`
//! and returns a self-contained [`ChartLayout`]. Nothing is cached between
//! calls, so identical input always yields identical geometry.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::annotation::{
    AnnotationFrame, AnnotationPass, LabelAlign, StaggerCounters, place_annotations,
};
use crate::core::bar_geometry::{BarFrame, BarRect, bar_opacity};
use crate::core::element::{GraphElement, assign_stacked_segments, build_elements};
use crate::core::margins::{MarginAccumulator, Margins};
use crate::core::scale_resolver::{
    ScaleDomain, build_scale, conditional_bounds, resolve_domain, resolve_padding,
    retain_in_domain,
};
use crate::core::settings::{
    AxisMode, ChartSettings, InvalidValuePolicy, LayoutConfig, OverlapStyle,
};
use crate::core::text_metrics::{HeuristicTextMetrics, TextMetrics};
use crate::core::types::{DataPoint, DataSet, Offset, Point, Viewport};
use crate::core::value_format::{DefaultValueFormatter, ValueFormatter};
use crate::error::{LayoutError, LayoutResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutPhase {
    Idle,
    Scanning,
    ScaleResolved,
    BarsBuilt,
    AnnotationsPlaced,
    Done,
}

impl LayoutPhase {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Idle => Self::Scanning,
            Self::Scanning => Self::ScaleResolved,
            Self::ScaleResolved => Self::BarsBuilt,
            Self::BarsBuilt => Self::AnnotationsPlaced,
            Self::AnnotationsPlaced | Self::Done => Self::Done,
        }
    }
}

fn advance(phase: &mut LayoutPhase) {
    let next = phase.next();
    trace!(from = ?*phase, to = ?next, "layout phase");
    *phase = next;
}

/// Value axis drawn under the bar track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
    pub min_label: String,
    pub max_label: String,
    pub color: String,
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
}

/// Renderer-facing record of one data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementLayout {
    /// Index of the point in the host's data set.
    pub source_index: usize,
    pub category: String,
    pub value: f64,
    /// `None` when the point is annotated but not drawn in the bar.
    pub bar: Option<BarRect>,
    pub bar_color: String,
    pub opacity: f64,
    /// Where the connector touches the bar track.
    pub anchor: Point,
    /// From the anchor to the note point where the text sits.
    pub offset: Offset,
    pub align: LabelAlign,
    /// Empty when labels are hidden.
    pub text: String,
    pub text_color: String,
    pub font_family: String,
    pub font_size: f64,
    pub text_width: f64,
    pub text_height: f64,
    pub connector: bool,
    pub highlight: bool,
}

impl ElementLayout {
    #[must_use]
    pub fn note_point(&self) -> Point {
        Point {
            x: self.anchor.x + self.offset.dx,
            y: self.anchor.y + self.offset.dy,
        }
    }
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub domain: ScaleDomain,
    pub padding: f64,
    pub plot_width: f64,
    pub margins: Margins,
    /// Top of the bar track actually used by this pass.
    pub bar_top: f64,
    pub bar_height: f64,
    pub axis: Option<AxisLayout>,
    /// Elements in annotation placement order.
    pub elements: Vec<ElementLayout>,
    /// Indices into `elements` of the bars, in paint order.
    pub bar_draw_order: Vec<usize>,
    /// Points removed because their effective value fell outside the domain
    /// or, under `InvalidValuePolicy::SkipPoint`, was not finite.
    pub dropped: usize,
}

impl ChartLayout {
    /// Empty result for an empty data set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn bars(&self) -> impl Iterator<Item = (&ElementLayout, BarRect)> + '_ {
        self.bar_draw_order.iter().filter_map(|&index| {
            let element = self.elements.get(index)?;
            element.bar.map(|rect| (element, rect))
        })
    }
}

/// Stateless layout engine holding the injected host capabilities.
pub struct LayoutEngine {
    metrics: Box<dyn TextMetrics>,
    formatter: Box<dyn ValueFormatter>,
    config: LayoutConfig,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(
            Box::new(HeuristicTextMetrics::default()),
            Box::new(DefaultValueFormatter),
        )
    }
}

impl LayoutEngine {
    #[must_use]
    pub fn new(metrics: Box<dyn TextMetrics>, formatter: Box<dyn ValueFormatter>) -> Self {
        Self {
            metrics,
            formatter,
            config: LayoutConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LayoutConfig) -> LayoutResult<Self> {
        self.config = config.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    #[must_use]
    pub fn formatter(&self) -> &dyn ValueFormatter {
        self.formatter.as_ref()
    }

    /// Runs one full layout pass.
    ///
    /// Oversized input fails before any text is measured.
    pub fn compute(
        &self,
        data: &DataSet,
        settings: &ChartSettings,
        viewport: Viewport,
    ) -> LayoutResult<ChartLayout> {
        if !viewport.is_valid() {
            return Err(LayoutError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if data.len() > self.config.max_points {
            warn!(
                count = data.len(),
                limit = self.config.max_points,
                "aborting layout for oversized input"
            );
            return Err(LayoutError::OversizedInput {
                count: data.len(),
                limit: self.config.max_points,
            });
        }
        settings.validate()?;

        let mut phase = LayoutPhase::Idle;
        advance(&mut phase);

        let (accepted, invalid) = self.accept_points(&data.points)?;
        let style = settings.annotation.overlap_style;
        let mut elements = build_elements(
            &accepted,
            settings,
            self.metrics.as_ref(),
            self.formatter.as_ref(),
        );
        if style == OverlapStyle::Stacked {
            assign_stacked_segments(&mut elements);
        }
        let mut margins = MarginAccumulator::new(settings.annotation.spacing);
        for element in &elements {
            margins.observe(element.top, element.text.height);
        }
        trace!(
            scanned = margins.observed(),
            skipped = invalid,
            "scanned elements"
        );
        advance(&mut phase);

        let conditional = conditional_bounds(&elements, style);
        let domain = resolve_domain(conditional, style, &settings.axis);
        let value_format = settings.value_format();
        let padding = resolve_padding(
            domain,
            &settings.axis,
            &value_format,
            self.config.default_padding,
            self.metrics.as_ref(),
            self.formatter.as_ref(),
        );
        let (mut elements, out_of_domain) = retain_in_domain(elements, domain);
        if out_of_domain > 0 {
            debug!(
                dropped = out_of_domain,
                min = domain.min,
                max = domain.max,
                "dropped elements outside the scale domain"
            );
        }
        let top_count = elements.iter().filter(|element| element.top).count();
        let margins = margins.finish(settings.text.annotation_style, top_count);
        if style != OverlapStyle::Edge {
            elements.reverse();
        }
        let chart_width = f64::from(viewport.width);
        let scale = build_scale(domain, chart_width, padding)?;
        advance(&mut phase);

        let stagger = settings.annotation.stagger;
        let bar_top = margins.bar_top(stagger);
        let bar_height = settings.annotation.bar_height;
        let bars = style.bar_layout().compute_bar_geometry(
            &elements,
            &BarFrame {
                scale,
                baseline: domain.baseline(),
                padding,
                top: bar_top,
                bar_height,
            },
        );
        advance(&mut phase);

        let AnnotationPass {
            placements,
            counters,
        } = place_annotations(
            &elements,
            &AnnotationFrame {
                scale,
                padding,
                plot_width: chart_width - 2.0 * padding,
                margins,
                bar_height,
                stagger,
                axis_shown: settings.axis.mode.is_shown(),
                style,
                bars: &bars,
            },
        );
        debug_assert_eq!(counters, StaggerCounters::default());
        advance(&mut phase);

        let mut output_index = vec![0usize; elements.len()];
        let mut rects: Vec<Option<BarRect>> = vec![None; elements.len()];
        for bar in &bars {
            rects[bar.element] = Some(bar.rect);
        }
        let records: Vec<ElementLayout> = placements
            .iter()
            .enumerate()
            .map(|(position, placement)| {
                output_index[placement.element] = position;
                let element = &elements[placement.element];
                element_record(
                    element,
                    rects[placement.element],
                    placement.anchor,
                    placement.offset,
                    placement.align,
                    data.cross_highlight,
                    settings,
                )
            })
            .collect();
        let bar_draw_order = bars.iter().map(|bar| output_index[bar.element]).collect();

        let axis = self.axis_layout(settings, domain, padding, chart_width, bar_top + bar_height);
        advance(&mut phase);

        let dropped = invalid + out_of_domain;
        debug!(
            elements = records.len(),
            bars = bars.len(),
            dropped,
            min = domain.min,
            max = domain.max,
            padding,
            "layout pass complete"
        );

        Ok(ChartLayout {
            viewport,
            domain,
            padding,
            plot_width: scale.range_width(),
            margins,
            bar_top,
            bar_height,
            axis,
            elements: records,
            bar_draw_order,
            dropped,
        })
    }

    fn accept_points<'a>(
        &self,
        points: &'a [DataPoint],
    ) -> LayoutResult<(Vec<(usize, &'a DataPoint)>, usize)> {
        let mut accepted = Vec::with_capacity(points.len());
        let mut skipped = 0;
        for (index, point) in points.iter().enumerate() {
            let reason = if !point.value.is_finite() {
                format!("value {} is not finite", point.value)
            } else if let Some(field) = point.manual.non_finite_field() {
                format!("manual {field} is not finite")
            } else {
                accepted.push((index, point));
                continue;
            };
            match self.config.invalid_value_policy {
                InvalidValuePolicy::RejectDataset => {
                    warn!(index, %reason, "rejecting data set with invalid value");
                    return Err(LayoutError::InvalidValue { index, reason });
                }
                InvalidValuePolicy::SkipPoint => {
                    warn!(index, %reason, "skipping point with invalid value");
                    skipped += 1;
                }
            }
        }
        Ok((accepted, skipped))
    }

    fn axis_layout(
        &self,
        settings: &ChartSettings,
        domain: ScaleDomain,
        padding: f64,
        chart_width: f64,
        y: f64,
    ) -> Option<AxisLayout> {
        let axis = &settings.axis;
        let (min_label, max_label) = match axis.mode {
            AxisMode::None => return None,
            AxisMode::Percentage => ("0%".to_owned(), "100%".to_owned()),
            AxisMode::Values => {
                let format = settings.value_format();
                (
                    self.formatter.format(domain.min, &format),
                    self.formatter.format(domain.max, &format),
                )
            }
        };
        Some(AxisLayout {
            y,
            x_start: padding,
            x_end: (chart_width - padding).max(padding),
            min_label,
            max_label,
            color: axis.color.clone(),
            font_family: axis.font_family.clone(),
            font_size: axis.font_size,
            bold: axis.bold,
        })
    }
}

fn element_record(
    element: &GraphElement,
    bar: Option<BarRect>,
    anchor: Point,
    offset: Offset,
    align: LabelAlign,
    cross_highlight: bool,
    settings: &ChartSettings,
) -> ElementLayout {
    let text = if settings.annotation.hide_labels {
        String::new()
    } else {
        element.annotation_text.clone()
    };
    ElementLayout {
        source_index: element.source_index,
        category: element.category.clone(),
        value: element.value,
        bar,
        bar_color: element.bar_color.clone(),
        opacity: bar_opacity(cross_highlight, element.highlight),
        anchor,
        offset,
        align,
        text,
        text_color: element.annotation_color.clone(),
        font_family: element.font_family.clone(),
        font_size: element.font_size,
        text_width: element.text.width,
        text_height: element.text.height,
        connector: settings.text.annotation_style.draws_connector(),
        highlight: element.highlight,
    }
}
