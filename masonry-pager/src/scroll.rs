//! End-of-content detection for infinite scrolling.
//!
//! ## Usage
//!
//! Forward every scroll event of the hosting view to
//! [`EndReachedTrigger::on_scroll`]; fetch the next page whenever it returns
//! `true`.

use tracing::trace;

use crate::Dp;

/// Distance from the end, below which the next page is fetched.
pub const DEFAULT_PAGE_END_THRESHOLD: Dp = Dp(1000.0);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: Dp,
    pub height: Dp,
}

impl Size {
    pub fn new(width: impl Into<Dp>, height: impl Into<Dp>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: Dp,
    pub y: Dp,
}

/// Scroll position reported by the hosting view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollEvent {
    /// Size of the whole scrollable content.
    pub content_size: Size,
    /// How far the content is scrolled.
    pub content_offset: Offset,
    /// Size of the visible viewport.
    pub layout_measurement: Size,
}

impl ScrollEvent {
    /// Vertical scroll event for content of `content_height`, scrolled by
    /// `offset`, seen through a viewport of `viewport_height`.
    pub fn vertical(
        content_height: impl Into<Dp>,
        offset: impl Into<Dp>,
        viewport_height: impl Into<Dp>,
    ) -> Self {
        Self {
            content_size: Size {
                width: Dp::ZERO,
                height: content_height.into(),
            },
            content_offset: Offset {
                x: Dp::ZERO,
                y: offset.into(),
            },
            layout_measurement: Size {
                width: Dp::ZERO,
                height: viewport_height.into(),
            },
        }
    }

    pub fn content_length(&self) -> Dp {
        self.content_size.height
    }

    /// Content still below the bottom edge of the viewport.
    pub fn distance_from_end(&self) -> Dp {
        self.content_size.height - self.layout_measurement.height - self.content_offset.y
    }
}

/// Fires once per content length when the viewport nears the end.
///
/// Many scroll events arrive during a single gesture while the content
/// length stays the same; only the first one below the threshold fires.
/// Once the next page lands the content grows and the trigger re-arms.
#[derive(Clone, Debug, PartialEq)]
pub struct EndReachedTrigger {
    threshold: Dp,
    sent_for_content_length: Option<Dp>,
}

impl Default for EndReachedTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_END_THRESHOLD)
    }
}

impl EndReachedTrigger {
    pub fn new(threshold: Dp) -> Self {
        Self {
            threshold,
            sent_for_content_length: None,
        }
    }

    pub fn threshold(&self) -> Dp {
        self.threshold
    }

    /// Content length that last fired, if any.
    pub fn sent_for_content_length(&self) -> Option<Dp> {
        self.sent_for_content_length
    }

    /// Returns `true` when the next page should be fetched.
    pub fn on_scroll(&mut self, event: &ScrollEvent) -> bool {
        let content_length = event.content_length();
        if self.sent_for_content_length == Some(content_length) {
            return false;
        }
        let distance = event.distance_from_end();
        if distance < self.threshold {
            trace!("End reached: {distance} left of {content_length}");
            self.sent_for_content_length = Some(content_length);
            return true;
        }
        false
    }

    /// Re-arms the trigger for the current content length.
    pub fn reset(&mut self) {
        self.sent_for_content_length = None;
    }
}
