use annotated_bar::core::annotation::{AnnotationFrame, place_annotations};
use annotated_bar::core::bar_geometry::{BarFrame, MIN_NESTED_BAR_HEIGHT};
use annotated_bar::core::element::{assign_stacked_segments, build_elements};
use annotated_bar::core::margins::MarginAccumulator;
use annotated_bar::core::scale_resolver::{
    build_scale, conditional_bounds, resolve_domain, retain_in_domain,
};
use annotated_bar::core::{
    AxisMode, ChartSettings, DataPoint, DataSet, DefaultValueFormatter, HeuristicTextMetrics,
    InsideBars, LabelPosition, LayoutEngine, OverlapStyle, Viewport,
};
use proptest::prelude::*;

fn overlap_style() -> impl Strategy<Value = OverlapStyle> {
    prop_oneof![
        Just(OverlapStyle::Full),
        Just(OverlapStyle::Stacked),
        Just(OverlapStyle::Edge),
        Just(OverlapStyle::Inside),
    ]
}

fn points(values: &[(f64, bool)]) -> Vec<DataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, (value, top))| {
            let position = if *top {
                LabelPosition::Top
            } else {
                LabelPosition::Bottom
            };
            DataPoint::new(format!("p{i}"), *value).with_position(position)
        })
        .collect()
}

proptest! {
    #[test]
    fn surviving_elements_stay_inside_the_domain(
        values in prop::collection::vec((-1_000.0f64..1_000.0, any::<bool>()), 0..40),
        style in overlap_style(),
        bar_min in prop::option::of(-500.0f64..0.0),
        bar_max in prop::option::of(0.0f64..500.0),
    ) {
        let mut settings = ChartSettings::default();
        settings.annotation.overlap_style = style;
        settings.axis.bar_min = bar_min;
        settings.axis.bar_max = bar_max;

        let points = points(&values);
        let indexed: Vec<(usize, &DataPoint)> = points.iter().enumerate().collect();
        let mut elements = build_elements(
            &indexed,
            &settings,
            &HeuristicTextMetrics::default(),
            &DefaultValueFormatter,
        );
        if style == OverlapStyle::Stacked {
            assign_stacked_segments(&mut elements);
        }
        let domain = resolve_domain(conditional_bounds(&elements, style), style, &settings.axis);
        let before = elements.len();
        let (kept, dropped) = retain_in_domain(elements, domain);

        prop_assert_eq!(kept.len() + dropped, before);
        for element in &kept {
            prop_assert!(domain.min <= element.effective_value());
            prop_assert!(element.effective_value() <= domain.max);
        }
    }

    #[test]
    fn annotation_pass_exhausts_stagger_counters(
        values in prop::collection::vec((-1_000.0f64..1_000.0, any::<bool>()), 0..40),
        style in overlap_style(),
        stagger in any::<bool>(),
        axis_shown in any::<bool>(),
    ) {
        let settings = ChartSettings::default();
        let points = points(&values);
        let indexed: Vec<(usize, &DataPoint)> = points.iter().enumerate().collect();
        let mut elements = build_elements(
            &indexed,
            &settings,
            &HeuristicTextMetrics::default(),
            &DefaultValueFormatter,
        );
        if style == OverlapStyle::Stacked {
            assign_stacked_segments(&mut elements);
        }
        let mut margins = MarginAccumulator::new(settings.annotation.spacing);
        for element in &elements {
            margins.observe(element.top, element.text.height);
        }
        let domain = conditional_bounds(&elements, style);
        let top_count = elements.iter().filter(|element| element.top).count();
        let margins = margins.finish(settings.text.annotation_style, top_count);
        let scale = build_scale(domain, 600.0, 15.0).expect("scale");
        let bars = style.bar_layout().compute_bar_geometry(
            &elements,
            &BarFrame {
                scale,
                baseline: domain.baseline(),
                padding: 15.0,
                top: margins.bar_top(stagger),
                bar_height: 30.0,
            },
        );

        let pass = place_annotations(
            &elements,
            &AnnotationFrame {
                scale,
                padding: 15.0,
                plot_width: 570.0,
                margins,
                bar_height: 30.0,
                stagger,
                axis_shown,
                style,
                bars: &bars,
            },
        );

        prop_assert!(pass.counters.is_exhausted());
        prop_assert_eq!(pass.placements.len(), elements.len());
        let mut visited: Vec<usize> = pass.placements.iter().map(|p| p.element).collect();
        visited.sort_unstable();
        prop_assert_eq!(visited, (0..elements.len()).collect::<Vec<_>>());
    }

    #[test]
    fn layout_is_idempotent(
        values in prop::collection::vec((-1_000.0f64..1_000.0, any::<bool>()), 0..30),
        style in overlap_style(),
        stagger in any::<bool>(),
        show_axis in any::<bool>(),
    ) {
        let mut settings = ChartSettings::default();
        settings.annotation.overlap_style = style;
        settings.annotation.stagger = stagger;
        settings.axis.mode = if show_axis { AxisMode::Values } else { AxisMode::None };

        let data = DataSet::new(points(&values));
        let engine = LayoutEngine::default();
        let viewport = Viewport::new(640, 320);

        let first = engine.compute(&data, &settings, viewport).expect("first layout");
        let second = engine.compute(&data, &settings, viewport).expect("second layout");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn nested_bar_heights_shrink_monotonically(count in 1usize..64) {
        let heights = InsideBars::nested_heights(40.0, count);
        prop_assert_eq!(heights.len(), count);
        prop_assert_eq!(heights[0], 40.0);
        if count > 1 {
            let smallest = (40.0 / count as f64).max(MIN_NESTED_BAR_HEIGHT);
            prop_assert_eq!(heights[count - 1], smallest);
            for middle in &heights[1..count - 1] {
                prop_assert!(*middle < 40.0 && *middle > smallest);
            }
            prop_assert!(heights.windows(2).all(|pair| pair[0] > pair[1]));
        }
    }
}
