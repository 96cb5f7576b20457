use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{LayoutError, LayoutResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> LayoutResult<f64> {
    value.to_f64().ok_or_else(|| {
        LayoutError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Ten-color categorical palette used for bars without an explicit color.
pub const DEFAULT_BAR_PALETTE: [&str; 10] = [
    "rgb(186,215,57)",
    "rgb(0,188,178)",
    "rgb(121,118,118)",
    "rgb(105,161,151)",
    "rgb(78,205,196)",
    "rgb(166,197,207)",
    "rgb(215,204,182)",
    "rgb(67,158,157)",
    "rgb(122,141,45)",
    "rgb(162,157,167)",
];

#[must_use]
pub fn default_bar_color(index: usize) -> &'static str {
    DEFAULT_BAR_PALETTE[index % DEFAULT_BAR_PALETTE.len()]
}
