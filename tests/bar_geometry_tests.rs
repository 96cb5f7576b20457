use annotated_bar::core::bar_geometry::{BarFrame, BarLayout, MIN_NESTED_BAR_HEIGHT, PlacedBar};
use annotated_bar::core::element::{GraphElement, assign_stacked_segments, build_elements};
use annotated_bar::core::{
    ChartSettings, DataPoint, DefaultValueFormatter, EdgeBars, FullBars, HeuristicTextMetrics,
    InsideBars, LinearScale, OverlapStyle, StackedBars,
};
use approx::assert_abs_diff_eq;

fn elements_from(points: &[DataPoint]) -> Vec<GraphElement> {
    let indexed: Vec<(usize, &DataPoint)> = points.iter().enumerate().collect();
    build_elements(
        &indexed,
        &ChartSettings::default(),
        &HeuristicTextMetrics::default(),
        &DefaultValueFormatter,
    )
}

fn elements(values: &[f64]) -> Vec<GraphElement> {
    let points: Vec<DataPoint> = values
        .iter()
        .enumerate()
        .map(|(i, value)| DataPoint::new(format!("p{i}"), *value))
        .collect();
    elements_from(&points)
}

fn frame(min: f64, max: f64, range: f64, padding: f64, bar_height: f64) -> BarFrame {
    BarFrame {
        scale: LinearScale::new(min, max, range).expect("scale"),
        baseline: 0.0,
        padding,
        top: 20.0,
        bar_height,
    }
}

fn values_in_draw_order(elements: &[GraphElement], bars: &[PlacedBar]) -> Vec<f64> {
    bars.iter().map(|bar| elements[bar.element].value).collect()
}

#[test]
fn full_bars_draw_negatives_ascending_then_positives_descending() {
    let elements = elements(&[10.0, -5.0, 3.0, -1.0]);
    let bars = FullBars.compute_bar_geometry(&elements, &frame(-5.0, 10.0, 150.0, 10.0, 30.0));
    assert_eq!(
        values_in_draw_order(&elements, &bars),
        vec![-5.0, -1.0, 10.0, 3.0]
    );
}

#[test]
fn full_bars_grow_from_the_baseline_and_share_the_track() {
    let elements = elements(&[10.0, -5.0, 3.0]);
    let bars = FullBars.compute_bar_geometry(&elements, &frame(-5.0, 10.0, 150.0, 10.0, 30.0));

    let negative = bars[0].rect;
    assert_abs_diff_eq!(negative.x, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(negative.width, 50.0, epsilon = 1e-9);

    let largest = bars[1].rect;
    assert_abs_diff_eq!(largest.x, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(largest.width, 100.0, epsilon = 1e-9);

    let smallest = bars[2].rect;
    assert_abs_diff_eq!(smallest.x, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(smallest.width, 30.0, epsilon = 1e-9);

    assert!(bars.iter().all(|bar| bar.rect.y == 20.0 && bar.rect.height == 30.0));
}

#[test]
fn hidden_bar_points_produce_no_rect() {
    let points = vec![
        DataPoint::new("a", 4.0),
        DataPoint::new("b", 6.0).with_show_in_bar(false),
    ];
    let elements = elements_from(&points);
    let bars = FullBars.compute_bar_geometry(&elements, &frame(0.0, 6.0, 60.0, 0.0, 30.0));
    assert_eq!(bars.len(), 1);
    assert_eq!(elements[bars[0].element].category, "a");
}

#[test]
fn stacked_segments_partition_the_axis() {
    let mut elements = elements(&[5.0, -3.0, 2.0, -1.0]);
    assign_stacked_segments(&mut elements);
    let bars = StackedBars.compute_bar_geometry(&elements, &frame(-4.0, 7.0, 110.0, 0.0, 30.0));

    let spans: Vec<(f64, f64)> = bars
        .iter()
        .map(|bar| (bar.rect.x, bar.rect.x + bar.rect.width))
        .collect();
    // Ascending values: -3, -1, 2, 5.
    let expected = [(10.0, 40.0), (0.0, 10.0), (40.0, 60.0), (60.0, 110.0)];
    for ((start, end), (expected_start, expected_end)) in spans.iter().zip(expected) {
        assert_abs_diff_eq!(*start, expected_start, epsilon = 1e-9);
        assert_abs_diff_eq!(*end, expected_end, epsilon = 1e-9);
    }
}

#[test]
fn edge_bars_split_the_track_into_slices() {
    let elements = elements(&[1.0, 2.0, 3.0]);
    let bars = EdgeBars.compute_bar_geometry(&elements, &frame(0.0, 3.0, 90.0, 0.0, 30.0));
    let slices: Vec<(f64, f64)> = bars.iter().map(|bar| (bar.rect.y, bar.rect.height)).collect();
    assert_eq!(slices, vec![(20.0, 10.0), (30.0, 10.0), (40.0, 10.0)]);
}

#[test]
fn edge_slices_only_count_points_shown_in_bar() {
    let points = vec![
        DataPoint::new("a", 1.0),
        DataPoint::new("b", 2.0).with_show_in_bar(false),
        DataPoint::new("c", 3.0),
    ];
    let elements = elements_from(&points);
    let bars = EdgeBars.compute_bar_geometry(&elements, &frame(0.0, 3.0, 90.0, 0.0, 30.0));
    assert_eq!(bars.len(), 2);
    assert!(bars.iter().all(|bar| bar.rect.height == 15.0));
    assert_eq!(bars[1].rect.y, 35.0);
}

#[test]
fn inside_bars_nest_and_center() {
    let elements = elements(&[1.0, 2.0, 3.0]);
    let bars = InsideBars.compute_bar_geometry(&elements, &frame(0.0, 3.0, 90.0, 0.0, 40.0));

    let heights: Vec<f64> = bars.iter().map(|bar| bar.rect.height).collect();
    assert_abs_diff_eq!(heights[0], 40.0);
    assert_abs_diff_eq!(heights[1], 80.0 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(heights[2], 40.0 / 3.0, epsilon = 1e-9);

    for bar in &bars {
        let center = bar.rect.y + bar.rect.height / 2.0;
        assert_abs_diff_eq!(center, 40.0, epsilon = 1e-9);
    }
}

#[test]
fn inside_bars_keep_a_visible_floor() {
    let heights = InsideBars::nested_heights(40.0, 20);
    assert_eq!(heights[0], 40.0);
    assert_eq!(heights[19], MIN_NESTED_BAR_HEIGHT);
}

#[test]
fn overlap_style_selects_matching_strategy() {
    let elements = elements(&[1.0, 2.0]);
    let frame = frame(0.0, 2.0, 100.0, 0.0, 30.0);
    for style in [
        OverlapStyle::Full,
        OverlapStyle::Edge,
        OverlapStyle::Inside,
    ] {
        assert_eq!(style.bar_layout().compute_bar_geometry(&elements, &frame).len(), 2);
    }
    assert_eq!(
        OverlapStyle::Edge
            .bar_layout()
            .compute_bar_geometry(&elements, &frame),
        EdgeBars.compute_bar_geometry(&elements, &frame)
    );
}
