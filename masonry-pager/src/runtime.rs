//! Tokio-backed page fetching.
//!
//! [`AsyncFetcher`] turns an async function into a [`PageFetcher`]: every
//! request is spawned on a runtime and the ticket is resolved with whatever
//! the future returns.

use std::{future::Future, sync::OnceLock};

use tokio::runtime::{Handle, Runtime};

use crate::{
    connection::ItemSource,
    fetch::{FetchError, FetchRequest, FetchTicket, PageFetcher},
};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Shared runtime for fetchers created outside of any tokio context.
pub fn get() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("masonry-pager-fetch")
            .enable_all()
            .build()
            .expect("failed to build the masonry-pager fetch runtime")
    })
}

/// Runs page requests as futures on a tokio runtime.
pub struct AsyncFetcher<F> {
    fetch: F,
    handle: Handle,
}

impl<F> AsyncFetcher<F> {
    /// Spawns on the current runtime when called from within one, otherwise
    /// on the shared runtime returned by [`get`].
    pub fn new(fetch: F) -> Self {
        let handle = Handle::try_current().unwrap_or_else(|_| get().handle().clone());
        Self::with_handle(fetch, handle)
    }

    /// Spawns on the given runtime.
    pub fn with_handle(fetch: F, handle: Handle) -> Self {
        Self { fetch, handle }
    }
}

impl<S, F, Fut> PageFetcher<S> for AsyncFetcher<F>
where
    S: ItemSource,
    F: Fn(FetchRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<S, FetchError>> + Send + 'static,
{
    fn fetch(&self, request: FetchRequest, ticket: FetchTicket<S>) {
        let future = (self.fetch)(request);
        self.handle.spawn(async move {
            ticket.resolve(future.await);
        });
    }
}
