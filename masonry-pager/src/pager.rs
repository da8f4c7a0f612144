//! Page fetch state machine.
//!
//! The grid never asks for "the next page" by offset. It asks the data
//! source for a larger window: `page_size` items at first, then
//! `2 * page_size`, and so on. [`PagerController`] owns that growing window
//! and guarantees at most one request is outstanding.
//!
//! ```text
//! Idle --request--> FetchingNextPage --more available--> Idle
//!                        |        \--failed--> Idle
//!                        \--no next page--> Exhausted (terminal)
//! ```

use tracing::debug;

/// Items requested per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where the pager is in its fetch cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PagerState {
    /// Ready to fetch when asked.
    #[default]
    Idle,
    /// A request is outstanding.
    FetchingNextPage,
    /// The source reported no further items. Terminal.
    Exhausted,
}

/// A request handed out by [`PagerController::request_next_page`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// Identifies this request among all requests of the pager.
    pub generation: u64,
    /// Total number of items the source should return.
    pub desired_total_size: usize,
}

/// What a completion did to the pager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageOutcome {
    /// More items are available; the pager is idle again.
    MoreAvailable,
    /// The source ran dry. Reported exactly once per pager.
    Exhausted,
    /// The completion did not belong to the outstanding request.
    Ignored,
}

/// Owns the requested window and the fetch state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagerController {
    state: PagerState,
    page_size: usize,
    desired_total_size: usize,
    pending: Option<PageRequest>,
    next_generation: u64,
}

impl Default for PagerController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PagerController {
    /// Creates an idle pager whose first window is one page. A zero page size
    /// is treated as one.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            state: PagerState::Idle,
            page_size,
            desired_total_size: page_size,
            pending: None,
            next_generation: 0,
        }
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Size of the last window the source successfully returned.
    pub fn desired_total_size(&self) -> usize {
        self.desired_total_size
    }

    /// The outstanding request, if any.
    pub fn pending(&self) -> Option<PageRequest> {
        self.pending
    }

    pub fn is_fetching(&self) -> bool {
        self.state == PagerState::FetchingNextPage
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == PagerState::Exhausted
    }

    /// Starts fetching the next page.
    ///
    /// Returns `None` while a request is outstanding or after the source ran
    /// dry, so duplicate triggers are harmless.
    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        if self.state != PagerState::Idle {
            debug!("Skipping page request while {:?}", self.state);
            return None;
        }
        let request = PageRequest {
            generation: self.next_generation,
            desired_total_size: self.desired_total_size.saturating_add(self.page_size),
        };
        self.next_generation += 1;
        self.pending = Some(request);
        self.state = PagerState::FetchingNextPage;
        debug!(
            "Requesting {} items (generation {})",
            request.desired_total_size, request.generation
        );
        Some(request)
    }

    /// Applies a successful completion of request `generation`.
    pub fn complete(&mut self, generation: u64, has_next_page: bool) -> PageOutcome {
        let Some(request) = self.take_pending(generation) else {
            return PageOutcome::Ignored;
        };
        self.desired_total_size = request.desired_total_size;
        if has_next_page {
            self.state = PagerState::Idle;
            PageOutcome::MoreAvailable
        } else {
            debug!(
                "Source exhausted at {} requested items",
                self.desired_total_size
            );
            self.state = PagerState::Exhausted;
            PageOutcome::Exhausted
        }
    }

    /// Applies a failed completion of request `generation`. The window is not
    /// grown and the pager becomes idle so a later trigger can retry.
    ///
    /// Returns whether the failure belonged to the outstanding request.
    pub fn fail(&mut self, generation: u64) -> bool {
        if self.take_pending(generation).is_none() {
            return false;
        }
        self.state = PagerState::Idle;
        true
    }

    fn take_pending(&mut self, generation: u64) -> Option<PageRequest> {
        match self.pending {
            Some(request)
                if request.generation == generation
                    && self.state == PagerState::FetchingNextPage =>
            {
                self.pending = None;
                Some(request)
            }
            _ => {
                debug!("Ignoring completion of stale request (generation {generation})");
                None
            }
        }
    }
}
