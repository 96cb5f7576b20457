use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, ChartSettings};
use crate::error::{LayoutError, LayoutResult};

pub const CHART_LAYOUT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayoutJsonContractV1 {
    pub schema_version: u32,
    pub layout: ChartLayout,
}

impl ChartLayout {
    pub fn to_json_contract_v1_pretty(&self) -> LayoutResult<String> {
        let payload = ChartLayoutJsonContractV1 {
            schema_version: CHART_LAYOUT_JSON_SCHEMA_V1,
            layout: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            LayoutError::Serialization(format!("failed to serialize layout contract v1: {e}"))
        })
    }

    /// Accepts either a bare layout or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> LayoutResult<Self> {
        if let Ok(layout) = serde_json::from_str::<ChartLayout>(input) {
            return Ok(layout);
        }
        let payload: ChartLayoutJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            LayoutError::Serialization(format!("failed to parse layout json payload: {e}"))
        })?;
        if payload.schema_version != CHART_LAYOUT_JSON_SCHEMA_V1 {
            return Err(LayoutError::Serialization(format!(
                "unsupported layout schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.layout)
    }
}

impl ChartSettings {
    pub fn to_json_pretty(&self) -> LayoutResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            LayoutError::Serialization(format!("failed to serialize chart settings: {e}"))
        })
    }

    /// Parses settings; missing groups and fields take their defaults.
    pub fn from_json_str(input: &str) -> LayoutResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            LayoutError::Serialization(format!("failed to parse chart settings: {e}"))
        })
    }
}
