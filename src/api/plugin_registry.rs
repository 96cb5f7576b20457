use crate::error::{LayoutError, LayoutResult};
use crate::extensions::ChartPlugin;
use crate::render::Renderer;

use super::AnnotatedBarChart;

impl<R: Renderer> AnnotatedBarChart<R> {
    /// Registers a plugin with unique identifier. Plugins are notified in
    /// registration order.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> LayoutResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            return Err(LayoutError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.plugins.contains_key(&plugin_id) {
            return Err(LayoutError::InvalidData(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        self.plugins.insert(plugin_id, plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        self.plugins.shift_remove(plugin_id).is_some()
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.contains_key(plugin_id)
    }
}
