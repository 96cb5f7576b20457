use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{ChartLayout, ChartSettings, DataSet, LayoutEngine, Viewport};
use crate::error::{LayoutError, LayoutResult};
use crate::extensions::{ChartPlugin, LayoutFailureKind, PluginEvent};
use crate::render::Renderer;

use super::build_render_frame;

/// Update driver consumed by host applications.
///
/// Holds the latest data and settings; every [`update`](Self::update) runs a
/// complete layout pass and hands the resulting frame to the renderer.
pub struct AnnotatedBarChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) engine: LayoutEngine,
    pub(super) viewport: Viewport,
    pub(super) settings: ChartSettings,
    pub(super) data: DataSet,
    pub(super) plugins: IndexMap<String, Box<dyn ChartPlugin>>,
    pub(super) last_layout: Option<ChartLayout>,
}

impl<R: Renderer> AnnotatedBarChart<R> {
    pub fn new(renderer: R, viewport: Viewport) -> LayoutResult<Self> {
        Self::with_engine(renderer, viewport, LayoutEngine::default())
    }

    /// Uses a custom engine, e.g. one wired to the host's text measurement.
    pub fn with_engine(renderer: R, viewport: Viewport, engine: LayoutEngine) -> LayoutResult<Self> {
        if !viewport.is_valid() {
            return Err(LayoutError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self {
            renderer,
            engine,
            viewport,
            settings: ChartSettings::default(),
            data: DataSet::default(),
            plugins: IndexMap::new(),
            last_layout: None,
        })
    }

    /// Replaces the data set. Takes effect on the next update.
    pub fn set_data(&mut self, data: DataSet) {
        debug!(
            points = data.len(),
            cross_highlight = data.cross_highlight,
            "set data"
        );
        self.data = data;
        self.emit_plugin_event(PluginEvent::DataUpdated {
            points_len: self.data.len(),
        });
    }

    /// Replaces the settings after validating them.
    pub fn set_settings(&mut self, settings: ChartSettings) -> LayoutResult<()> {
        settings.validate()?;
        self.settings = settings;
        self.emit_plugin_event(PluginEvent::SettingsUpdated);
        Ok(())
    }

    /// Loads settings from (possibly partial) JSON.
    pub fn set_settings_json(&mut self, input: &str) -> LayoutResult<()> {
        let settings = ChartSettings::from_json_str(input)?;
        self.set_settings(settings)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> LayoutResult<()> {
        if !viewport.is_valid() {
            return Err(LayoutError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    /// Runs a full layout pass and renders it.
    ///
    /// On failure nothing is rendered, the previous layout is discarded and
    /// plugins receive `RenderFailed`.
    pub fn update(&mut self) -> LayoutResult<()> {
        let layout = match self.engine.compute(&self.data, &self.settings, self.viewport) {
            Ok(layout) => layout,
            Err(err) => {
                warn!(error = %err, "layout pass failed");
                self.last_layout = None;
                self.emit_plugin_event(PluginEvent::RenderFailed {
                    kind: LayoutFailureKind::from_layout_error(&err),
                });
                return Err(err);
            }
        };

        let elements_len = layout.elements.len();
        let dropped = layout.dropped;
        let frame = build_render_frame(&layout);
        self.last_layout = Some(layout);
        self.emit_plugin_event(PluginEvent::LayoutCompleted {
            elements_len,
            dropped,
        });

        if let Err(err) = self.renderer.render(&frame) {
            warn!(error = %err, "renderer rejected frame");
            self.emit_plugin_event(PluginEvent::RenderFailed {
                kind: LayoutFailureKind::Render,
            });
            return Err(err);
        }
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn data(&self) -> &DataSet {
        &self.data
    }

    #[must_use]
    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Layout of the last successful update.
    #[must_use]
    pub fn last_layout(&self) -> Option<&ChartLayout> {
        self.last_layout.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
