//! Section width tracking.
//!
//! ## Usage
//!
//! Feed every layout pass of the hosting scroll view into
//! [`SectionLayout::update_width`] and re-render when it reports a change.

use tracing::debug;

use crate::Dp;

/// Viewports wider than this get three sections by default.
pub const WIDE_VIEWPORT_WIDTH: Dp = Dp(700.0);

/// Layout measurement reported by the hosting view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutEvent {
    pub width: Dp,
    /// Reported by hosts but never consulted.
    pub height: Dp,
}

impl LayoutEvent {
    pub fn new(width: impl Into<Dp>, height: impl Into<Dp>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }
}

/// Default section count for a viewport: three on tablets, two on phones.
pub fn default_section_count(viewport_width: Dp) -> usize {
    if viewport_width > WIDE_VIEWPORT_WIDTH {
        3
    } else {
        2
    }
}

/// Derives the width of each section from the measured grid width.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    section_count: usize,
    section_margin: Dp,
    section_width: Dp,
}

impl SectionLayout {
    /// Creates an unmeasured layout. A zero section count is treated as one
    /// and a negative margin as zero.
    pub fn new(section_count: usize, section_margin: Dp) -> Self {
        Self {
            section_count: section_count.max(1),
            section_margin: section_margin.non_negative(),
            section_width: Dp::ZERO,
        }
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    pub fn section_margin(&self) -> Dp {
        self.section_margin
    }

    /// Width of a single section, zero until the first usable layout pass.
    pub fn section_width(&self) -> Dp {
        self.section_width
    }

    /// Whether a usable width has been measured yet.
    pub fn is_measured(&self) -> bool {
        self.section_width.is_positive()
    }

    /// Applies a measured total width and returns whether the section width
    /// changed.
    ///
    /// Widths that leave no positive room for a section, such as the zero
    /// widths of spurious layout passes, are ignored. The margins only sit
    /// between sections, never after the last one.
    pub fn update_width(&mut self, total_width: Dp) -> bool {
        let margins = self.section_margin * (self.section_count - 1) as f64;
        let section_width = (total_width - margins) / self.section_count as f64;
        if !section_width.is_positive() {
            debug!("Ignoring layout pass with unusable width {total_width}");
            return false;
        }
        if section_width == self.section_width {
            return false;
        }
        debug!(
            "Section width {} -> {section_width} for total width {total_width}",
            self.section_width
        );
        self.section_width = section_width;
        true
    }

    /// Margin to the right of a section; the last section has none.
    pub fn trailing_margin(&self, index: usize) -> Dp {
        if index + 1 >= self.section_count {
            Dp::ZERO
        } else {
            self.section_margin
        }
    }

    /// Horizontal origin of a section within the grid.
    pub fn section_origin(&self, index: usize) -> Dp {
        (self.section_width + self.section_margin) * index as f64
    }
}
