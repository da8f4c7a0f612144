//! Boundary to the data source.
//!
//! The grid hands each page request to a [`PageFetcher`] together with a
//! [`FetchTicket`]. The fetcher runs the query however it likes and resolves
//! the ticket exactly once with the refreshed record, or with an error.

use std::sync::Weak;

use parking_lot::Mutex;
use thiserror::Error;

use crate::{
    connection::ItemSource,
    grid::{self, GridShared},
    query::{ArtworksQuery, QueryValue},
};

/// A request for a larger window of items.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchRequest {
    /// Total number of items the source should return, counted from the
    /// start of the connection.
    pub desired_total_size: usize,
    /// Fixed query variables of the grid.
    pub query: ArtworksQuery,
}

impl FetchRequest {
    /// All variables of the request, window size included.
    pub fn variables(&self) -> Vec<(&'static str, QueryValue)> {
        self.query.variables(self.desired_total_size)
    }
}

/// Why a page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network request failed: {0}")]
    Network(String),
    #[error("data source rejected the query: {0}")]
    Source(String),
    #[error("fetch was abandoned before it completed")]
    Abandoned,
}

/// Runs page requests against the data source.
pub trait PageFetcher<S: ItemSource>: Send + Sync + 'static {
    /// Starts fetching `request`. `ticket` must eventually be resolved, from
    /// this call or later; dropping it counts as [`FetchError::Abandoned`].
    fn fetch(&self, request: FetchRequest, ticket: FetchTicket<S>);
}

impl<S, F> PageFetcher<S> for F
where
    S: ItemSource,
    F: Fn(FetchRequest, FetchTicket<S>) + Send + Sync + 'static,
{
    fn fetch(&self, request: FetchRequest, ticket: FetchTicket<S>) {
        (self)(request, ticket)
    }
}

/// One-shot completion handle for a page request.
///
/// The ticket only holds a weak reference to its grid. Resolving it after the
/// grid was disposed or dropped, or after a newer request superseded it, has
/// no effect.
pub struct FetchTicket<S: ItemSource> {
    shared: Option<Weak<Mutex<GridShared<S>>>>,
    generation: u64,
}

impl<S: ItemSource> FetchTicket<S> {
    pub(crate) fn new(shared: Weak<Mutex<GridShared<S>>>, generation: u64) -> Self {
        Self {
            shared: Some(shared),
            generation,
        }
    }

    /// Identifies the request this ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Delivers the outcome of the request.
    pub fn resolve(mut self, result: Result<S, FetchError>) {
        if let Some(shared) = self.shared.take() {
            grid::apply_fetch_result(&shared, self.generation, result);
        }
    }

    /// Shorthand for resolving with a refreshed record.
    pub fn succeed(self, source: S) {
        self.resolve(Ok(source));
    }

    /// Shorthand for resolving with an error.
    pub fn fail(self, error: FetchError) {
        self.resolve(Err(error));
    }
}

impl<S: ItemSource> Drop for FetchTicket<S> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            grid::apply_fetch_result(&shared, self.generation, Err(FetchError::Abandoned));
        }
    }
}

impl<S: ItemSource> std::fmt::Debug for FetchTicket<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchTicket")
            .field("generation", &self.generation)
            .field("resolved", &self.shared.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connection::Connection, item::Artwork, query::GeneArtworksQuery};

    #[test]
    fn request_variables_use_window_size() {
        let request = FetchRequest {
            desired_total_size: 30,
            query: GeneArtworksQuery::default().into(),
        };
        let variables = request.variables();
        assert_eq!(variables[0], ("totalSize", QueryValue::Int(30)));
        assert!(variables.contains(&("forSale", QueryValue::Bool(true))));
    }

    #[test]
    fn ticket_for_missing_grid_is_inert() {
        let ticket: FetchTicket<Connection<Artwork>> = FetchTicket::new(Weak::new(), 3);
        assert_eq!(ticket.generation(), 3);
        assert_eq!(
            format!("{ticket:?}"),
            "FetchTicket { generation: 3, resolved: false }"
        );
        ticket.succeed(Connection::default());

        let dropped: FetchTicket<Connection<Artwork>> = FetchTicket::new(Weak::new(), 4);
        drop(dropped);
    }

    #[test]
    fn errors_describe_the_failure() {
        assert_eq!(
            FetchError::Network("timeout".into()).to_string(),
            "network request failed: timeout"
        );
        assert_eq!(
            FetchError::Abandoned.to_string(),
            "fetch was abandoned before it completed"
        );
    }
}
