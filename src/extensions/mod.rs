//! Host-side extension hooks.
//!
//! Extensions observe the update cycle; they never feed back into layout.

pub mod plugins;

pub use plugins::{ChartPlugin, LayoutFailureKind, PluginContext, PluginEvent};
