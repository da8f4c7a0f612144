use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;

use crate::{
    ArtistArtworks, ArtworksQuery, Connection, Dp, FetchError, FetchRequest, FetchTicket,
    GeneArtworks, GeneArtworksQuery, ImageDescriptor, InfiniteScrollGrid, InfiniteScrollGridArgs,
    LayoutEvent, PagerState, QueryValue, ScrollEvent, item::Artwork,
};

type Tickets<S> = Arc<Mutex<Vec<(FetchRequest, FetchTicket<S>)>>>;

/// Fetcher that parks every ticket until the test resolves it.
fn parking_fetcher<S: crate::ItemSource>()
-> (Tickets<S>, impl Fn(FetchRequest, FetchTicket<S>) + Send + Sync + 'static) {
    let tickets: Tickets<S> = Arc::new(Mutex::new(Vec::new()));
    let sink = tickets.clone();
    (tickets, move |request, ticket| sink.lock().push((request, ticket)))
}

fn catalogue(count: usize) -> Vec<Artwork> {
    (0..count)
        .map(|i| {
            let artwork = Artwork::new(format!("artwork-{i}"));
            // Every seventh artwork lacks an image.
            if i % 7 == 6 {
                artwork
            } else {
                artwork.with_image(ImageDescriptor::with_aspect_ratio(0.5 + (i % 4) as f64 * 0.5))
            }
        })
        .collect()
}

fn window(total: usize, size: usize) -> Connection<Artwork> {
    Connection::from_nodes(catalogue(total).into_iter().take(size), size < total)
}

fn near_end(content_height: f64) -> ScrollEvent {
    ScrollEvent::vertical(content_height, content_height - 900.0, 800.0)
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let sink = count.clone();
    (count, move || {
        sink.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn frame_is_empty_until_first_usable_layout() {
    let (_tickets, fetcher) = parking_fetcher::<Connection<Artwork>>();
    let grid = InfiniteScrollGrid::new(InfiniteScrollGridArgs::default(), window(40, 10), fetcher);

    assert!(grid.frame().sections.is_empty());
    assert!(!grid.on_layout(LayoutEvent::new(0.0, 600.0)));
    assert!(grid.frame().sections.is_empty());

    assert!(grid.on_layout(LayoutEvent::new(375.0, 600.0)));
    let frame = grid.frame();
    assert_eq!(frame.sections.len(), 2);
    assert_eq!(grid.section_width(), Dp(177.5));
    // artwork-6 has no image.
    assert_eq!(frame.item_count(), 9);
}

#[test]
fn scrolling_near_end_fetches_one_page_at_a_time() {
    let (tickets, fetcher) = parking_fetcher::<Connection<Artwork>>();
    let grid = InfiniteScrollGrid::new(InfiniteScrollGridArgs::default(), window(40, 10), fetcher);
    grid.on_layout(LayoutEvent::new(375.0, 800.0));

    assert!(!grid.on_scroll(&ScrollEvent::vertical(3000.0, 0.0, 800.0)));
    assert!(grid.on_scroll(&near_end(3000.0)));
    assert!(grid.frame().show_spinner);

    // Same content length: deduplicated. New length: still guarded.
    assert!(!grid.on_scroll(&near_end(3000.0)));
    assert!(!grid.on_scroll(&near_end(3100.0)));
    assert!(!grid.request_next_page());
    assert_eq!(tickets.lock().len(), 1);

    let (request, ticket) = tickets.lock().remove(0);
    assert_eq!(request.desired_total_size, 20);
    ticket.succeed(window(40, request.desired_total_size));

    assert_eq!(grid.state(), PagerState::Idle);
    assert_eq!(grid.desired_total_size(), 20);
    assert!(!grid.frame().show_spinner);
    assert_eq!(grid.frame().item_count(), 18);
}

#[test]
fn exhaustion_notifies_once_and_stops_fetching() {
    let (completions, on_complete) = counter();
    let (tickets, fetcher) = parking_fetcher::<Connection<Artwork>>();
    let args = InfiniteScrollGridArgs::default().on_complete(on_complete);
    let grid = InfiniteScrollGrid::new(args, window(15, 10), fetcher);
    grid.on_layout(LayoutEvent::new(375.0, 800.0));

    assert!(grid.on_scroll(&near_end(2000.0)));
    let (request, ticket) = tickets.lock().remove(0);
    ticket.succeed(window(15, request.desired_total_size));

    assert_eq!(grid.state(), PagerState::Exhausted);
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    for content_height in [2000.0, 2500.0, 9000.0] {
        assert!(!grid.on_scroll(&ScrollEvent::vertical(content_height, content_height, 800.0)));
    }
    assert!(!grid.request_next_page());
    assert!(tickets.lock().is_empty());
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_fetch_returns_to_idle_and_can_retry() {
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = errors.clone();
    let (tickets, fetcher) = parking_fetcher::<Connection<Artwork>>();
    let args = InfiniteScrollGridArgs::default().on_error(move |error| sink.lock().push(error));
    let grid = InfiniteScrollGrid::new(args, window(40, 10), fetcher);
    grid.on_layout(LayoutEvent::new(375.0, 800.0));

    assert!(grid.on_scroll(&near_end(3000.0)));
    let (_, ticket) = tickets.lock().remove(0);
    ticket.fail(FetchError::Network("timed out".into()));

    assert_eq!(grid.state(), PagerState::Idle);
    assert_eq!(grid.desired_total_size(), 10);
    assert_eq!(*errors.lock(), [FetchError::Network("timed out".into())]);

    // The same content length may trigger again after a failure.
    assert!(grid.on_scroll(&near_end(3000.0)));
    let (request, _ticket) = tickets.lock().remove(0);
    assert_eq!(request.desired_total_size, 20);
}

#[test]
fn dropped_ticket_counts_as_failure() {
    let grid = InfiniteScrollGrid::new(
        InfiniteScrollGridArgs::default(),
        window(40, 10),
        |_request: FetchRequest, ticket: FetchTicket<Connection<Artwork>>| drop(ticket),
    );

    assert!(grid.request_next_page());
    assert_eq!(grid.state(), PagerState::Idle);
    assert_eq!(grid.desired_total_size(), 10);
}

#[test]
fn results_after_dispose_are_discarded() {
    let (completions, on_complete) = counter();
    let (tickets, fetcher) = parking_fetcher::<Connection<Artwork>>();
    let args = InfiniteScrollGridArgs::default().on_complete(on_complete);
    let grid = InfiniteScrollGrid::new(args, window(15, 10), fetcher);

    assert!(grid.request_next_page());
    grid.dispose();
    assert!(grid.is_disposed());

    let (_, ticket) = tickets.lock().remove(0);
    ticket.succeed(window(15, 20));

    assert_eq!(grid.state(), PagerState::FetchingNextPage);
    assert_eq!(grid.with_source(Connection::len), 10);
    assert_eq!(completions.load(Ordering::SeqCst), 0);
    assert!(!grid.on_layout(LayoutEvent::new(375.0, 800.0)));
    assert!(!grid.request_next_page());
}

#[test]
fn results_after_drop_are_discarded() {
    let (completions, on_complete) = counter();
    let (tickets, fetcher) = parking_fetcher::<Connection<Artwork>>();
    let args = InfiniteScrollGridArgs::default().on_complete(on_complete);
    let grid = InfiniteScrollGrid::new(args, window(15, 10), fetcher);

    assert!(grid.request_next_page());
    drop(grid);

    let (_, ticket) = tickets.lock().remove(0);
    ticket.succeed(window(15, 20));
    assert_eq!(completions.load(Ordering::SeqCst), 0);
}

#[test]
fn completion_callback_may_reenter_grid() {
    let grid_slot: Arc<Mutex<Option<Arc<InfiniteScrollGrid<Connection<Artwork>>>>>> =
        Arc::new(Mutex::new(None));
    let observed = Arc::new(Mutex::new(None));

    let slot = grid_slot.clone();
    let seen = observed.clone();
    let args = InfiniteScrollGridArgs::default().on_complete(move || {
        if let Some(grid) = slot.lock().as_ref() {
            *seen.lock() = Some(grid.state());
        }
    });
    let grid = Arc::new(InfiniteScrollGrid::new(
        args,
        window(12, 10),
        |request: FetchRequest, ticket: FetchTicket<Connection<Artwork>>| {
            ticket.succeed(window(12, request.desired_total_size));
        },
    ));
    *grid_slot.lock() = Some(grid.clone());

    assert!(grid.request_next_page());
    assert_eq!(*observed.lock(), Some(PagerState::Exhausted));

    grid_slot.lock().take();
}

#[test]
fn artist_and_gene_records_share_one_grid() {
    let artist = ArtistArtworks {
        artist_id: "banksy".into(),
        artworks: Some(window(30, 10)),
    };
    let (artist_tickets, fetcher) = parking_fetcher::<ArtistArtworks>();
    let artist_grid = InfiniteScrollGrid::new(InfiniteScrollGridArgs::default(), artist, fetcher);

    let gene = GeneArtworks {
        gene_id: "street-art".into(),
        artworks: Some(window(30, 10)),
    };
    let (gene_tickets, fetcher) = parking_fetcher::<GeneArtworks>();
    let gene_args = InfiniteScrollGridArgs::for_viewport(1024.0)
        .query(GeneArtworksQuery::default().medium("painting"));
    let gene_grid = InfiniteScrollGrid::new(gene_args, gene, fetcher);

    artist_grid.on_layout(LayoutEvent::new(375.0, 800.0));
    gene_grid.on_layout(LayoutEvent::new(1024.0, 800.0));
    assert_eq!(artist_grid.frame().sections.len(), 2);
    assert_eq!(gene_grid.frame().sections.len(), 3);

    artist_grid.request_next_page();
    gene_grid.request_next_page();

    let (artist_request, artist_ticket) = artist_tickets.lock().remove(0);
    assert!(matches!(artist_request.query, ArtworksQuery::Artist(_)));
    artist_ticket.succeed(ArtistArtworks {
        artist_id: "banksy".into(),
        artworks: Some(window(30, 20)),
    });

    let (gene_request, gene_ticket) = gene_tickets.lock().remove(0);
    assert!(
        gene_request
            .variables()
            .contains(&("medium", QueryValue::String("painting".into())))
    );
    assert!(
        gene_request
            .variables()
            .contains(&("totalSize", QueryValue::Int(20)))
    );
    gene_ticket.succeed(GeneArtworks {
        gene_id: "street-art".into(),
        artworks: None,
    });

    assert_eq!(artist_grid.state(), PagerState::Idle);
    assert_eq!(gene_grid.state(), PagerState::Exhausted);
    assert!(gene_grid.frame().is_empty());
}

#[test]
fn length_seen_during_fetch_stays_spent_until_content_grows() {
    let (tickets, fetcher) = parking_fetcher::<Connection<Artwork>>();
    let grid = InfiniteScrollGrid::new(InfiniteScrollGridArgs::default(), window(40, 10), fetcher);
    grid.on_layout(LayoutEvent::new(375.0, 800.0));

    assert!(grid.on_scroll(&near_end(3000.0)));
    // Fires the trigger but the pager refuses while a fetch is in flight.
    assert!(!grid.on_scroll(&near_end(3100.0)));

    let (request, ticket) = tickets.lock().remove(0);
    ticket.succeed(window(40, request.desired_total_size));
    assert_eq!(grid.state(), PagerState::Idle);

    assert!(!grid.on_scroll(&near_end(3100.0)));
    assert!(tickets.lock().is_empty());

    assert!(grid.on_scroll(&near_end(3200.0)));
    assert_eq!(tickets.lock().len(), 1);
}

#[test]
fn source_copy_can_be_used_alongside_grid_calls() {
    let (_tickets, fetcher) = parking_fetcher::<Connection<Artwork>>();
    let grid = InfiniteScrollGrid::new(InfiniteScrollGridArgs::default(), window(40, 10), fetcher);

    let source = grid.source();
    grid.set_source(window(40, 20));
    assert_eq!(source.len(), 10);
    assert_eq!(grid.with_source(Connection::len), 20);
    assert_eq!(grid.state(), PagerState::Idle);
}
