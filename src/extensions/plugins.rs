use serde::{Deserialize, Serialize};

use crate::core::{OverlapStyle, Viewport};
use crate::error::LayoutError;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub points_len: usize,
    pub overlap_style: OverlapStyle,
    /// Domain of the last successful layout, if any.
    pub domain: Option<(f64, f64)>,
}

/// Coarse classification of a failed update, forwarded to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutFailureKind {
    OversizedInput,
    InvalidValue,
    InvalidViewport,
    InvalidData,
    Render,
}

impl LayoutFailureKind {
    #[must_use]
    pub fn from_layout_error(error: &LayoutError) -> Self {
        match error {
            LayoutError::OversizedInput { .. } => Self::OversizedInput,
            LayoutError::InvalidValue { .. } => Self::InvalidValue,
            LayoutError::InvalidViewport { .. } => Self::InvalidViewport,
            LayoutError::InvalidData(_) | LayoutError::Serialization(_) => Self::InvalidData,
        }
    }
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    DataUpdated { points_len: usize },
    SettingsUpdated,
    LayoutCompleted { elements_len: usize, dropped: usize },
    /// The update was aborted; nothing was rendered.
    RenderFailed { kind: LayoutFailureKind },
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe update events and read chart context without mutating
/// layout internals.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
