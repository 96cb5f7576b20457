//! Vertical margins derived from measured annotation heights.
//!
//! Annotation height depends on the font, so the space reserved above the bar
//! track is accumulated bottom-up while elements are scanned and frozen once
//! per pass by [`MarginAccumulator::finish`].

use serde::{Deserialize, Serialize};

use crate::core::settings::AnnotationStyle;

pub const BASE_MARGIN_TOP: f64 = 10.0;
pub const BASE_MARGIN_TOP_STAGGER: f64 = 20.0;
/// Room above a top label's text for its connector.
pub const TOP_LABEL_CLEARANCE: f64 = 30.0;

/// Frozen vertical margins of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Bar track top when annotations are not staggered.
    pub top: f64,
    /// Bar track top when annotations are staggered.
    pub top_stagger: f64,
    /// Vertical distance between staggered annotations.
    pub spacing: f64,
}

impl Margins {
    #[must_use]
    pub fn bar_top(self, stagger: bool) -> f64 {
        if stagger { self.top_stagger } else { self.top }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginAccumulator {
    top: f64,
    top_stagger: f64,
    spacing: f64,
    observed: usize,
}

impl MarginAccumulator {
    #[must_use]
    pub fn new(base_spacing: f64) -> Self {
        Self {
            top: BASE_MARGIN_TOP,
            top_stagger: BASE_MARGIN_TOP_STAGGER,
            spacing: base_spacing,
            observed: 0,
        }
    }

    /// Folds one measured annotation into the margins.
    ///
    /// Spacing tracks the tallest annotation seen; growth caused by a top
    /// annotation is also reserved above the staggered bar track.
    pub fn observe(&mut self, top: bool, text_height: f64) {
        self.observed += 1;
        if text_height > self.spacing {
            let delta = text_height - self.spacing;
            self.spacing = text_height;
            if top {
                self.top_stagger += delta;
            }
        }
        if top {
            self.top = self.top.max(text_height + TOP_LABEL_CLEARANCE);
        }
    }

    #[must_use]
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Freezes the margins.
    ///
    /// `top_count` is the number of top annotations that survived domain
    /// filtering; each one reserves a full spacing step above the staggered
    /// track.
    #[must_use]
    pub fn finish(self, style: AnnotationStyle, top_count: usize) -> Margins {
        let spacing = self.spacing + style.connector_clearance();
        Margins {
            top: self.top,
            top_stagger: self.top_stagger + top_count as f64 * spacing,
            spacing,
        }
    }
}
