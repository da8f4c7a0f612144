//! Paginated item sources.
//!
//! A [`Connection`] is the Relay-style list the data source hands back: the
//! edges fetched so far plus whether more are available. [`ItemSource`] is
//! the accessor that digs the connection out of whatever record was fetched,
//! so the same grid serves artist and gene artworks alike.

use crate::{
    item::{Artwork, MasonryItem},
    query::{ArtistArtworksQuery, ArtworksQuery, GeneArtworksQuery},
};

/// Information about the current window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Whether there are more items after the current window.
    pub has_next_page: bool,
}

/// A single entry of a connection.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<T> {
    /// The item. `None` when the source could not resolve it.
    pub node: Option<T>,
    /// Opaque cursor of this edge.
    pub cursor: Option<String>,
}

impl<T> Edge<T> {
    /// Creates an edge around a resolved node.
    pub fn new(node: T) -> Self {
        Self {
            node: Some(node),
            cursor: None,
        }
    }
}

/// Paginated list of items.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
        }
    }
}

impl<T> Connection<T> {
    /// Builds a connection from resolved nodes.
    pub fn from_nodes<I>(nodes: I, has_next_page: bool) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            edges: nodes.into_iter().map(Edge::new).collect(),
            page_info: PageInfo { has_next_page },
        }
    }

    /// Iterates the resolved nodes in order, skipping unresolved edges.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().filter_map(|edge| edge.node.as_ref())
    }

    /// Number of edges, resolved or not.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the connection holds no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Accessor for the connection inside a fetched record.
pub trait ItemSource: Send + 'static {
    /// Items listed by the connection.
    type Item: MasonryItem + Clone + Send;

    /// The connection, if the record has one.
    fn connection(&self) -> Option<&Connection<Self::Item>>;

    /// Query used when the grid is not given one explicitly.
    fn default_query() -> ArtworksQuery
    where
        Self: Sized,
    {
        ArtworksQuery::default()
    }

    /// Whether the source reports more items. A record without a connection
    /// has nothing more to offer.
    fn has_next_page(&self) -> bool {
        self.connection()
            .is_some_and(|connection| connection.page_info.has_next_page)
    }
}

impl<T> ItemSource for Connection<T>
where
    T: MasonryItem + Clone + Send + 'static,
{
    type Item = T;

    fn connection(&self) -> Option<&Connection<T>> {
        Some(self)
    }
}

/// An artist record carrying its artworks connection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArtistArtworks {
    pub artist_id: String,
    pub artworks: Option<Connection<Artwork>>,
}

impl ItemSource for ArtistArtworks {
    type Item = Artwork;

    fn connection(&self) -> Option<&Connection<Artwork>> {
        self.artworks.as_ref()
    }

    fn default_query() -> ArtworksQuery {
        ArtistArtworksQuery::default().into()
    }
}

/// A gene record carrying its artworks connection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneArtworks {
    pub gene_id: String,
    pub artworks: Option<Connection<Artwork>>,
}

impl ItemSource for GeneArtworks {
    type Item = Artwork;

    fn connection(&self) -> Option<&Connection<Artwork>> {
        self.artworks.as_ref()
    }

    fn default_query() -> ArtworksQuery {
        GeneArtworksQuery::default().into()
    }
}
