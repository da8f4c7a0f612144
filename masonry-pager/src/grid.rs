//! Infinite-scroll masonry grid.
//!
//! ## Usage
//!
//! Show a growing collection of artworks in balanced columns, fetching more
//! as the user nears the bottom.
//!
//! The grid is headless: the hosting view forwards its layout and scroll
//! events, and draws whatever [`InfiniteScrollGrid::frame`] returns.

use std::sync::{Arc, Weak};

use derive_setters::Setters;
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::{
    Dp,
    callback::{Callback, CallbackWith},
    connection::ItemSource,
    fetch::{FetchError, FetchRequest, FetchTicket, PageFetcher},
    frame::{GridFrame, build_frame},
    layout::{LayoutEvent, SectionLayout, default_section_count},
    masonry::partition_into_sections,
    pager::{DEFAULT_PAGE_SIZE, PageOutcome, PagerController, PagerState},
    query::ArtworksQuery,
    scroll::{DEFAULT_PAGE_END_THRESHOLD, EndReachedTrigger, ScrollEvent},
};

/// Defaults for the infinite-scroll grid.
pub struct GridDefaults;

impl GridDefaults {
    /// Sections on a phone-sized viewport.
    pub const SECTION_COUNT: usize = 2;
    /// Horizontal gap between sections.
    pub const SECTION_MARGIN: Dp = Dp(20.0);
    /// Vertical gap between tiles of a section.
    pub const ITEM_MARGIN: Dp = Dp(20.0);
    /// Items added per page.
    pub const PAGE_SIZE: usize = DEFAULT_PAGE_SIZE;
    /// Distance from the end at which the next page is fetched.
    pub const PAGE_END_THRESHOLD: Dp = DEFAULT_PAGE_END_THRESHOLD;
}

/// Construction-time configuration of an [`InfiniteScrollGrid`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct InfiniteScrollGridArgs {
    /// Number of sections (columns).
    pub section_count: usize,
    /// Horizontal gap between sections.
    #[setters(into)]
    pub section_margin: Dp,
    /// Vertical gap between tiles.
    #[setters(into)]
    pub item_margin: Dp,
    /// Items added per page.
    pub page_size: usize,
    /// Distance from the end at which the next page is fetched.
    #[setters(into)]
    pub page_end_threshold: Dp,
    /// Query variables; the item source's default query when unset.
    #[setters(skip)]
    pub query: Option<ArtworksQuery>,
    /// Called once when the source reports no more items.
    #[setters(skip)]
    pub on_complete: Option<Callback>,
    /// Called for every failed page fetch.
    #[setters(skip)]
    pub on_error: Option<CallbackWith<FetchError>>,
}

impl Default for InfiniteScrollGridArgs {
    fn default() -> Self {
        Self {
            section_count: GridDefaults::SECTION_COUNT,
            section_margin: GridDefaults::SECTION_MARGIN,
            item_margin: GridDefaults::ITEM_MARGIN,
            page_size: GridDefaults::PAGE_SIZE,
            page_end_threshold: GridDefaults::PAGE_END_THRESHOLD,
            query: None,
            on_complete: None,
            on_error: None,
        }
    }
}

impl InfiniteScrollGridArgs {
    /// Defaults with the section count picked for a viewport width.
    pub fn for_viewport(viewport_width: impl Into<Dp>) -> Self {
        Self {
            section_count: default_section_count(viewport_width.into()),
            ..Self::default()
        }
    }

    /// Sets the query variables.
    pub fn query(mut self, query: impl Into<ArtworksQuery>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the handler called once all items have been fetched.
    pub fn on_complete<F>(mut self, on_complete: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_complete = Some(Callback::new(on_complete));
        self
    }

    /// Sets the handler called when a page fetch fails.
    pub fn on_error<F>(mut self, on_error: F) -> Self
    where
        F: Fn(FetchError) + Send + Sync + 'static,
    {
        self.on_error = Some(CallbackWith::new(on_error));
        self
    }
}

pub(crate) struct GridShared<S: ItemSource> {
    layout: SectionLayout,
    pager: PagerController,
    trigger: EndReachedTrigger,
    source: S,
    query: ArtworksQuery,
    item_margin: Dp,
    on_complete: Option<Callback>,
    on_error: Option<CallbackWith<FetchError>>,
    disposed: bool,
}

enum Notification {
    Complete(Callback),
    Error(CallbackWith<FetchError>, FetchError),
}

impl Notification {
    fn deliver(self) {
        match self {
            Self::Complete(callback) => callback.call(),
            Self::Error(callback, error) => callback.call(error),
        }
    }
}

/// Headless infinite-scroll masonry grid over an [`ItemSource`].
///
/// All methods take `&self`; state lives behind a mutex so fetch results can
/// be delivered from any thread. Callbacks run after the lock is released and
/// may call back into the grid.
pub struct InfiniteScrollGrid<S: ItemSource> {
    shared: Arc<Mutex<GridShared<S>>>,
    fetcher: Arc<dyn PageFetcher<S>>,
}

impl<S: ItemSource> InfiniteScrollGrid<S> {
    /// Mounts a grid over `source`, the record fetched with the first page.
    pub fn new(args: InfiniteScrollGridArgs, source: S, fetcher: impl PageFetcher<S>) -> Self {
        let shared = GridShared {
            layout: SectionLayout::new(args.section_count, args.section_margin),
            pager: PagerController::new(args.page_size),
            trigger: EndReachedTrigger::new(args.page_end_threshold),
            source,
            query: args.query.unwrap_or_else(S::default_query),
            item_margin: args.item_margin,
            on_complete: args.on_complete,
            on_error: args.on_error,
            disposed: false,
        };
        Self {
            shared: Arc::new(Mutex::new(shared)),
            fetcher: Arc::new(fetcher),
        }
    }

    /// Applies a layout pass. Returns whether the section width changed and
    /// the grid needs a new frame.
    pub fn on_layout(&self, event: LayoutEvent) -> bool {
        let mut grid = self.shared.lock();
        if grid.disposed {
            return false;
        }
        grid.layout.update_width(event.width)
    }

    /// Applies a scroll event. Returns whether a page fetch was started.
    pub fn on_scroll(&self, event: &ScrollEvent) -> bool {
        let end_reached = {
            let mut grid = self.shared.lock();
            if grid.disposed || grid.pager.is_exhausted() {
                return false;
            }
            // The content length is recorded even while a fetch is in flight,
            // so it only fires again once the content grows or a fetch fails.
            grid.trigger.on_scroll(event)
        };
        end_reached && self.request_next_page()
    }

    /// Starts fetching the next page unless one is already in flight or the
    /// source is exhausted. Returns whether a fetch was started.
    #[instrument(level = "debug", skip(self))]
    pub fn request_next_page(&self) -> bool {
        let (request, generation) = {
            let mut grid = self.shared.lock();
            if grid.disposed {
                return false;
            }
            let Some(page) = grid.pager.request_next_page() else {
                return false;
            };
            let request = FetchRequest {
                desired_total_size: page.desired_total_size,
                query: grid.query.clone(),
            };
            (request, page.generation)
        };
        let ticket = FetchTicket::new(Arc::downgrade(&self.shared), generation);
        self.fetcher.fetch(request, ticket);
        true
    }

    /// Lays out the current items. Empty until the first usable layout pass.
    pub fn frame(&self) -> GridFrame<S::Item> {
        let grid = self.shared.lock();
        let show_spinner = grid.pager.is_fetching();
        if !grid.layout.is_measured() {
            return GridFrame::unmeasured(show_spinner);
        }
        let items = grid
            .source
            .connection()
            .into_iter()
            .flat_map(|connection| connection.nodes());
        let sections = partition_into_sections(items, grid.layout.section_count());
        build_frame(&grid.layout, &sections, grid.item_margin, show_spinner)
    }

    pub fn state(&self) -> PagerState {
        self.shared.lock().pager.state()
    }

    /// Size of the window the current items were fetched with.
    pub fn desired_total_size(&self) -> usize {
        self.shared.lock().pager.desired_total_size()
    }

    pub fn section_width(&self) -> Dp {
        self.shared.lock().layout.section_width()
    }

    /// Replaces the item source, e.g. after the data store refreshed it.
    /// The fetch state is left alone.
    pub fn set_source(&self, source: S) {
        let mut grid = self.shared.lock();
        if !grid.disposed {
            grid.source = source;
        }
    }

    /// Runs `f` against the current item source.
    ///
    /// `f` runs with the grid locked and must not call back into the grid;
    /// use [`source`](Self::source) for that.
    pub fn with_source<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.shared.lock().source)
    }

    /// A copy of the current item source, taken without holding the lock
    /// afterwards.
    pub fn source(&self) -> S
    where
        S: Clone,
    {
        self.shared.lock().source.clone()
    }

    /// Unmounts the grid. Results of outstanding fetches are discarded and
    /// further events are ignored.
    pub fn dispose(&self) {
        let mut grid = self.shared.lock();
        if !grid.disposed {
            debug!("Disposing grid while {:?}", grid.pager.state());
            grid.disposed = true;
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }
}

impl<S: ItemSource> Drop for InfiniteScrollGrid<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Applies the outcome of request `generation` to a grid, if it still wants
/// it.
pub(crate) fn apply_fetch_result<S: ItemSource>(
    shared: &Weak<Mutex<GridShared<S>>>,
    generation: u64,
    result: Result<S, FetchError>,
) {
    let Some(shared) = shared.upgrade() else {
        debug!("Dropping fetch result of generation {generation}: grid is gone");
        return;
    };

    let notification = {
        let mut grid = shared.lock();
        if grid.disposed {
            debug!("Dropping fetch result of generation {generation}: grid is disposed");
            return;
        }
        match result {
            Ok(source) => match grid.pager.complete(generation, source.has_next_page()) {
                PageOutcome::Ignored => return,
                PageOutcome::MoreAvailable => {
                    grid.source = source;
                    None
                }
                PageOutcome::Exhausted => {
                    grid.source = source;
                    grid.on_complete.clone().map(Notification::Complete)
                }
            },
            Err(error) => {
                if !grid.pager.fail(generation) {
                    return;
                }
                warn!("Fetching next page failed: {error}");
                grid.trigger.reset();
                grid.on_error
                    .clone()
                    .map(|callback| Notification::Error(callback, error))
            }
        }
    };

    if let Some(notification) = notification {
        notification.deliver();
    }
}
