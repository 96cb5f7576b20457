use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// Linear mapping from a value domain onto `[0, range_width]` pixels.
///
/// A zero-span domain (all-zero data) maps every value to pixel `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_width: f64,
}

impl LinearScale {
    /// Builds a scale. Negative range widths (viewport narrower than the
    /// padding) collapse to `0`.
    pub fn new(domain_start: f64, domain_end: f64, range_width: f64) -> LayoutResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(LayoutError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range_width.is_finite() {
            return Err(LayoutError::InvalidData(
                "scale range width must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_width: range_width.max(0.0),
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range_width(self) -> f64 {
        self.range_width
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return 0.0;
        }
        (value - self.domain_start) / span * self.range_width
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        if self.range_width == 0.0 {
            return self.domain_start;
        }
        let span = self.domain_end - self.domain_start;
        self.domain_start + pixel / self.range_width * span
    }
}
