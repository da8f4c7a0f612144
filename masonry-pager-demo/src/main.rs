//! Drives an [`InfiniteScrollGrid`] over an in-memory catalogue: lays it
//! out for a viewport, scrolls to the bottom until the catalogue is
//! exhausted, and logs each frame along the way.

mod catalogue;

use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use masonry_pager::{
    ArtistArtworks, ArtistArtworksQuery, Artwork, AsyncFetcher, Connection, FetchRequest,
    GeneArtworks, GeneArtworksQuery, GridFrame, InfiniteScrollGrid, InfiniteScrollGridArgs,
    ItemSource, LayoutEvent, PagerState, ScrollEvent, default_section_count,
};
use tracing::{debug, info, warn};

use crate::catalogue::Catalogue;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SourceKind {
    /// Artworks of an artist
    Artist,
    /// Artworks for sale in a gene
    Gene,
}

#[derive(Parser, Debug)]
#[command(name = "masonry-pager-demo")]
#[command(version, about = "Scroll an artwork catalogue through a masonry grid", long_about = None)]
struct Cli {
    /// Viewport width in dp
    #[arg(long, default_value_t = 375.0)]
    width: f64,
    /// Viewport height in dp
    #[arg(long, default_value_t = 667.0)]
    height: f64,
    /// Number of sections (defaults by viewport width)
    #[arg(short, long)]
    sections: Option<usize>,
    /// Items added per page
    #[arg(short, long, default_value_t = 10)]
    page_size: usize,
    /// Number of artworks in the catalogue
    #[arg(short, long, default_value_t = 45)]
    catalogue: usize,
    /// Kind of record the artworks hang off
    #[arg(long, value_enum, default_value_t = SourceKind::Artist)]
    source: SourceKind,
    /// Simulated request latency in milliseconds
    #[arg(long, default_value_t = 50)]
    latency_ms: u64,
    /// Fail every nth request
    #[arg(long)]
    fail_every: Option<usize>,
    /// Seed for the generated aspect ratios
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Give up after this many scroll steps
    #[arg(long, default_value_t = 100)]
    max_steps: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.width <= 0.0 || cli.height <= 0.0 {
        bail!("viewport must have a positive size, got {}x{}", cli.width, cli.height);
    }

    let catalogue = Catalogue::generate(cli.catalogue, cli.seed).fail_every(cli.fail_every);
    info!(
        "Catalogue of {} artworks, {:?} source, viewport {}x{}",
        catalogue.len(),
        cli.source,
        cli.width,
        cli.height
    );

    match cli.source {
        SourceKind::Artist => {
            let wrap = |artworks| ArtistArtworks {
                artist_id: "demo-artist".to_owned(),
                artworks: Some(artworks),
            };
            let args = grid_args(&cli).query(ArtistArtworksQuery::default());
            scroll_to_end(&cli, args, catalogue, wrap).await
        }
        SourceKind::Gene => {
            let wrap = |artworks| GeneArtworks {
                gene_id: "demo-gene".to_owned(),
                artworks: Some(artworks),
            };
            let args = grid_args(&cli).query(GeneArtworksQuery::default());
            scroll_to_end(&cli, args, catalogue, wrap).await
        }
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "off,masonry_pager=info,masonry_pager_demo=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

fn grid_args(cli: &Cli) -> InfiniteScrollGridArgs {
    let sections = cli
        .sections
        .unwrap_or_else(|| default_section_count(cli.width.into()));
    InfiniteScrollGridArgs::default()
        .section_count(sections)
        .page_size(cli.page_size)
        .on_complete(|| info!("All artworks loaded"))
        .on_error(|error| warn!("Page fetch failed: {error}"))
}

async fn scroll_to_end<S, W>(
    cli: &Cli,
    args: InfiniteScrollGridArgs,
    catalogue: Catalogue,
    wrap: W,
) -> Result<()>
where
    S: ItemSource<Item = Artwork>,
    W: Fn(Connection<Artwork>) -> S + Copy + Send + Sync + 'static,
{
    let first_page = wrap(catalogue.first(cli.page_size));
    let latency = Duration::from_millis(cli.latency_ms);
    let fetcher = AsyncFetcher::new(move |request: FetchRequest| {
        let catalogue = catalogue.clone();
        async move {
            debug!("Serving {:?}", request.variables());
            tokio::time::sleep(latency).await;
            catalogue.query(request.desired_total_size).map(wrap)
        }
    });
    let grid = InfiniteScrollGrid::new(args, first_page, fetcher);

    grid.on_layout(LayoutEvent::new(cli.width, cli.height));
    log_frame(&grid.frame());

    for step in 1..=cli.max_steps {
        if grid.state() == PagerState::Exhausted {
            info!("Exhausted after {} scroll steps", step - 1);
            return Ok(());
        }

        let content_height = grid.frame().estimated_content_height.get().max(cli.height);
        let bottom = ScrollEvent::vertical(content_height, content_height - cli.height, cli.height);
        if !grid.on_scroll(&bottom) {
            debug!("Scroll step {step} did not start a fetch");
        }

        while grid.state() == PagerState::FetchingNextPage {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        log_frame(&grid.frame());
    }

    bail!(
        "grid still {:?} after {} scroll steps",
        grid.state(),
        cli.max_steps
    )
}

fn log_frame(frame: &GridFrame<Artwork>) {
    let columns: Vec<String> = frame
        .sections
        .iter()
        .map(|section| {
            format!(
                "{}: {} items, ~{}",
                section.accessibility_label,
                section.items().count(),
                section.estimated_height
            )
        })
        .collect();
    info!(
        "Frame with {} items, ~{} tall [{}]",
        frame.item_count(),
        frame.estimated_content_height,
        columns.join(", ")
    );
}
