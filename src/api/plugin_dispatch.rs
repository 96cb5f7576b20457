use tracing::trace;

use crate::extensions::{PluginContext, PluginEvent};
use crate::render::Renderer;

use super::AnnotatedBarChart;

impl<R: Renderer> AnnotatedBarChart<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.viewport,
            points_len: self.data.len(),
            overlap_style: self.settings.annotation.overlap_style,
            domain: self
                .last_layout
                .as_ref()
                .map(|layout| (layout.domain.min, layout.domain.max)),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        let context = self.plugin_context();
        trace!(?event, plugins = self.plugins.len(), "dispatch plugin event");
        for plugin in self.plugins.values_mut() {
            plugin.on_event(event, context);
        }
    }
}
