//! masonry-pager lays out an endlessly growing collection of artworks in
//! balanced columns, and fetches more of them as the user scrolls.
//!
//! The crate is headless. A UI toolkit hosts the scroll view, forwards its
//! layout and scroll events to an [`InfiniteScrollGrid`], and draws the
//! [`GridFrame`] it gets back. Talking to the actual data source is the job
//! of a [`PageFetcher`].
//!
//! # Example
//!
//! ```
//! use masonry_pager::{
//!     Artwork, Connection, FetchRequest, FetchTicket, ImageDescriptor, InfiniteScrollGrid,
//!     InfiniteScrollGridArgs, LayoutEvent, ScrollEvent,
//! };
//!
//! let first_page = Connection::from_nodes(
//!     (0..10).map(|i| {
//!         Artwork::new(format!("artwork-{i}")).with_image(ImageDescriptor::with_aspect_ratio(0.8))
//!     }),
//!     true,
//! );
//!
//! let grid = InfiniteScrollGrid::new(
//!     InfiniteScrollGridArgs::for_viewport(375.0).on_complete(|| println!("all loaded")),
//!     first_page,
//!     |request: FetchRequest, ticket: FetchTicket<Connection<Artwork>>| {
//!         // Hand `request.variables()` to the GraphQL client and resolve the
//!         // ticket once the response arrives.
//!         ticket.succeed(Connection::from_nodes(
//!             (0..request.desired_total_size).map(|i| {
//!                 Artwork::new(format!("artwork-{i}"))
//!                     .with_image(ImageDescriptor::with_aspect_ratio(0.8))
//!             }),
//!             false,
//!         ));
//!     },
//! );
//!
//! grid.on_layout(LayoutEvent::new(375.0, 667.0));
//! assert_eq!(grid.frame().item_count(), 10);
//!
//! grid.on_scroll(&ScrollEvent::vertical(1500.0, 400.0, 667.0));
//! assert_eq!(grid.frame().item_count(), 20);
//! ```
//!
//! # Layout
//!
//! Each item goes to the column whose estimated height is smallest, where an
//! item's estimated height is the inverse of its image aspect ratio. See
//! [`partition_into_sections`].
//!
//! # Pagination
//!
//! Pages are requested as a growing window: the first `page_size` items,
//! then the first `2 * page_size`, and so on. At most one request is in
//! flight, and once the source reports no next page the grid stops asking.
//! See [`PagerController`].

pub mod callback;
pub mod connection;
pub mod dp;
pub mod fetch;
pub mod frame;
pub mod grid;
pub mod item;
pub mod layout;
pub mod masonry;
pub mod pager;
pub mod query;
#[cfg(feature = "tokio")]
pub mod runtime;
pub mod scroll;

#[cfg(test)]
mod test;

pub use crate::{
    callback::{Callback, CallbackWith},
    connection::{ArtistArtworks, Connection, Edge, GeneArtworks, ItemSource, PageInfo},
    dp::Dp,
    fetch::{FetchError, FetchRequest, FetchTicket, PageFetcher},
    frame::{GridFrame, ItemElement, SectionElement, SectionFrame, SpacerElement},
    grid::{GridDefaults, InfiniteScrollGrid, InfiniteScrollGridArgs},
    item::{Artwork, ImageDescriptor, MasonryItem},
    layout::{LayoutEvent, SectionLayout, default_section_count},
    masonry::{MasonrySection, partition_into_sections},
    pager::{PageOutcome, PageRequest, PagerController, PagerState},
    query::{ArtistArtworksQuery, ArtworksQuery, GeneArtworksQuery, QueryValue},
    scroll::{EndReachedTrigger, Offset, ScrollEvent, Size},
};

#[cfg(feature = "tokio")]
pub use crate::runtime::AsyncFetcher;
