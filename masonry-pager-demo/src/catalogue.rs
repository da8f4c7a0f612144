//! In-memory stand-in for the artworks API.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use masonry_pager::{Artwork, Connection, FetchError, ImageDescriptor};

const ASPECT_RATIOS: [f64; 6] = [0.5, 0.75, 1.0, 4.0 / 3.0, 1.5, 2.0];

/// A fixed list of artworks served as growing windows.
#[derive(Clone, Debug)]
pub struct Catalogue {
    artworks: Arc<[Artwork]>,
    requests: Arc<AtomicUsize>,
    fail_every: Option<usize>,
}

impl Catalogue {
    /// Generates `size` artworks. Every ninth one has no image.
    pub fn generate(size: usize, seed: u64) -> Self {
        let mut state = seed;
        let artworks = (0..size)
            .map(|i| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                let ratio = ASPECT_RATIOS[(state >> 33) as usize % ASPECT_RATIOS.len()];
                let artwork = Artwork::new(format!("artwork-{i:04}"))
                    .with_title(format!("Untitled #{i}"))
                    .with_artist_names("Anonymous")
                    .with_sale_message(if i % 4 == 0 { "Sold" } else { "Contact For Price" });
                if i % 9 == 8 {
                    artwork
                } else {
                    artwork.with_image(
                        ImageDescriptor::with_aspect_ratio(ratio)
                            .url(format!("https://img.example/{i}.jpg")),
                    )
                }
            })
            .collect();
        Self {
            artworks,
            requests: Arc::new(AtomicUsize::new(0)),
            fail_every: None,
        }
    }

    /// Makes every `n`th request fail with a network error.
    pub fn fail_every(mut self, n: Option<usize>) -> Self {
        self.fail_every = n.filter(|n| *n > 0);
        self
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    /// The first `total_size` artworks, without counting as a request.
    pub fn first(&self, total_size: usize) -> Connection<Artwork> {
        let window = self.artworks.iter().take(total_size).cloned();
        Connection::from_nodes(window, total_size < self.artworks.len())
    }

    /// Serves a page request.
    pub fn query(&self, total_size: usize) -> Result<Connection<Artwork>, FetchError> {
        let request = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_every.is_some_and(|n| request % n == 0) {
            return Err(FetchError::Network(format!("request {request} dropped")));
        }
        Ok(self.first(total_size))
    }
}
