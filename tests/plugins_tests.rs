use std::cell::RefCell;
use std::rc::Rc;

use annotated_bar::LayoutError;
use annotated_bar::api::AnnotatedBarChart;
use annotated_bar::core::{ChartSettings, DataPoint, DataSet, LayoutConfig, LayoutEngine, Viewport};
use annotated_bar::extensions::{ChartPlugin, LayoutFailureKind, PluginContext, PluginEvent};
use annotated_bar::render::NullRenderer;

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(PluginEvent, PluginContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<(PluginEvent, PluginContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: PluginEvent, context: PluginContext) {
        self.events.borrow_mut().push((event, context));
    }
}

fn event_kind(event: &PluginEvent) -> &'static str {
    match event {
        PluginEvent::DataUpdated { .. } => "data",
        PluginEvent::SettingsUpdated => "settings",
        PluginEvent::LayoutCompleted { .. } => "layout",
        PluginEvent::RenderFailed { .. } => "failed",
        PluginEvent::Rendered => "rendered",
    }
}

fn chart() -> AnnotatedBarChart<NullRenderer> {
    AnnotatedBarChart::new(NullRenderer::default(), Viewport::new(800, 300)).expect("chart init")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    chart.set_data(DataSet::new(vec![
        DataPoint::new("a", 10.0),
        DataPoint::new("b", 20.0),
    ]));
    chart
        .set_settings(ChartSettings::default())
        .expect("set settings");
    chart.update().expect("update");

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(kinds, vec!["data", "settings", "layout", "rendered"]);
    assert_eq!(
        events[2].0,
        PluginEvent::LayoutCompleted {
            elements_len: 2,
            dropped: 0
        }
    );
    let (_, context) = events[3];
    assert_eq!(context.points_len, 2);
    assert_eq!(context.domain, Some((0.0, 20.0)));
    assert_eq!(chart.renderer().frames_rendered, 1);
}

#[test]
fn oversized_input_signals_render_failure() {
    let engine = LayoutEngine::default()
        .with_config(LayoutConfig {
            max_points: 2,
            ..LayoutConfig::default()
        })
        .expect("config");
    let mut chart =
        AnnotatedBarChart::with_engine(NullRenderer::default(), Viewport::new(800, 300), engine)
            .expect("chart init");
    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    chart.set_data(DataSet::new(vec![DataPoint::new("a", 1.0)]));
    chart.update().expect("first update");
    assert!(chart.last_layout().is_some());

    chart.set_data(DataSet::new(vec![
        DataPoint::new("a", 1.0),
        DataPoint::new("b", 2.0),
        DataPoint::new("c", 3.0),
    ]));
    let err = chart.update().expect_err("oversized");
    assert_eq!(err, LayoutError::OversizedInput { count: 3, limit: 2 });
    assert!(chart.last_layout().is_none());
    assert_eq!(chart.renderer().frames_rendered, 1);

    let events = events.borrow();
    let (last, _) = events.last().expect("event");
    assert_eq!(
        *last,
        PluginEvent::RenderFailed {
            kind: LayoutFailureKind::OversizedInput
        }
    );
}

#[test]
fn duplicate_plugin_ids_are_rejected() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("same", events.clone())))
        .expect("first");
    let err = chart
        .register_plugin(Box::new(RecordingPlugin::new("same", events.clone())))
        .expect_err("duplicate");
    assert!(matches!(err, LayoutError::InvalidData(_)));
    assert!(
        chart
            .register_plugin(Box::new(RecordingPlugin::new("", events)))
            .is_err()
    );
    assert_eq!(chart.plugin_count(), 1);
}

#[test]
fn plugins_can_be_unregistered() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("a", events.clone())))
        .expect("a");
    chart
        .register_plugin(Box::new(RecordingPlugin::new("b", events.clone())))
        .expect("b");

    assert!(chart.unregister_plugin("a"));
    assert!(!chart.unregister_plugin("a"));
    assert!(!chart.has_plugin("a"));
    assert!(chart.has_plugin("b"));

    chart.set_data(DataSet::default());
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn invalid_settings_are_not_applied() {
    let mut chart = chart();
    let mut settings = ChartSettings::default();
    settings.axis.bar_min = Some(10.0);
    settings.axis.bar_max = Some(1.0);
    assert!(chart.set_settings(settings).is_err());
    assert_eq!(chart.settings(), &ChartSettings::default());
}

#[test]
fn settings_json_updates_the_chart() {
    let mut chart = chart();
    chart
        .set_settings_json(r#"{"annotation":{"overlap_style":"edge","stagger":false}}"#)
        .expect("settings json");
    assert!(!chart.settings().annotation.stagger);
    assert_eq!(chart.settings().annotation.bar_height, 30.0);
    assert!(chart.set_settings_json("{not json").is_err());
}

#[test]
fn zero_viewport_is_rejected() {
    assert!(AnnotatedBarChart::new(NullRenderer::default(), Viewport::new(0, 0)).is_err());
    let mut chart = chart();
    assert!(chart.set_viewport(Viewport::new(10, 0)).is_err());
    assert_eq!(chart.viewport(), Viewport::new(800, 300));
}
