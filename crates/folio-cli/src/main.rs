use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use folio_core::{HitPolicy, Surface};
use folio_data::{
    ActivityClient, ApiClient, Delimiter, LedgerClient, ListItem, MarketClient, Place,
    PlacesClient, PriceQuery, PriceTier, SiteConfig, SortOrder, StarCatalog,
    DEFAULT_HISTORY_DAYS, DEFAULT_RADIUS_M,
};
use folio_engine::{StarMap, StarMapConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Star map and homepage data tools")]
struct Cli {
    /// JSON site configuration (API base URLs, catalog location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the catalog comes from and how the widget is set up
#[derive(clap::Args)]
struct MapArgs {
    /// Catalog file path or http(s) URL (defaults to the configured catalog URL)
    #[arg(short, long)]
    catalog: Option<String>,

    /// Site origin for a configured catalog URL that is a bare path like `/stars.csv`
    #[arg(long)]
    origin: Option<String>,

    /// Drop stars fainter than this magnitude before sampling
    #[arg(long, allow_hyphen_values = true)]
    max_mag: Option<f64>,

    #[arg(long, default_value = "800")]
    width: u32,

    #[arg(long, default_value = "600")]
    height: u32,

    /// Show a random subset of this many stars
    #[arg(long)]
    sample: Option<usize>,

    /// Seed for the random subset
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the star map to a PNG
    Render {
        #[command(flatten)]
        map: MapArgs,

        #[arg(short, long, default_value = "stars.png")]
        output: PathBuf,
    },

    /// Show the tooltip for the star under a pointer position
    Hit {
        #[command(flatten)]
        map: MapArgs,

        #[arg(short, long, allow_hyphen_values = true)]
        x: f64,

        #[arg(short, long, allow_hyphen_values = true)]
        y: f64,

        /// Pick the closest overlapping marker instead of the first
        #[arg(long)]
        nearest: bool,
    },

    /// Catalog statistics
    Info {
        #[command(flatten)]
        map: MapArgs,

        /// Number of brightest stars to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Recently played games, songs and books
    Activity,

    /// Token prices with search, tier filter and sort
    Markets {
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long, value_enum, default_value = "all")]
        tier: TierArg,

        #[arg(long, value_enum, default_value = "value-desc")]
        sort: SortArg,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// USD price history of one token
    History {
        /// Market API coin id, e.g. `bitcoin`
        id: String,

        #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS)]
        days: u32,
    },

    /// Destinations recorded in the ledger contract
    Destinations {
        /// Also list attractions around each destination
        #[arg(long)]
        attractions: bool,

        /// Attraction search radius in meters
        #[arg(long, default_value_t = DEFAULT_RADIUS_M)]
        radius: u32,
    },

    /// Places near a coordinate (attractions by default)
    Places {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Search radius in meters
        #[arg(long, default_value_t = DEFAULT_RADIUS_M)]
        radius: u32,

        /// Comma-separated categories instead of the attraction list
        #[arg(long)]
        categories: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TierArg {
    All,
    Major,
    Mid,
    Small,
}

impl From<TierArg> for PriceTier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::All => PriceTier::All,
            TierArg::Major => PriceTier::Major,
            TierArg::Mid => PriceTier::Mid,
            TierArg::Small => PriceTier::Small,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    ValueDesc,
    ValueAsc,
    SymbolAsc,
    SymbolDesc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::ValueDesc => SortOrder::ValueDesc,
            SortArg::ValueAsc => SortOrder::ValueAsc,
            SortArg::SymbolAsc => SortOrder::SymbolAsc,
            SortArg::SymbolDesc => SortOrder::SymbolDesc,
        }
    }
}

/// Where `render`/`hit`/`info` read the catalog from
#[derive(Debug, PartialEq)]
enum CatalogSource {
    Url(String),
    Path(PathBuf),
    /// Site path fetched relative to an origin
    OnOrigin { origin: String, path: String },
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// `--catalog` wins; otherwise the configured URL, which needs `--origin`
/// when it is a bare site path
fn catalog_source(arg: Option<&str>, origin: Option<&str>, configured: &str) -> Result<CatalogSource> {
    Ok(match (arg, origin) {
        (Some(source), _) if is_url(source) => CatalogSource::Url(source.to_string()),
        (Some(path), _) => CatalogSource::Path(PathBuf::from(path)),
        (None, _) if is_url(configured) => CatalogSource::Url(configured.to_string()),
        (None, Some(origin)) => CatalogSource::OnOrigin {
            origin: origin.to_string(),
            path: configured.to_string(),
        },
        (None, None) => bail!(
            "configured catalog {configured:?} is a site path; pass --catalog or --origin"
        ),
    })
}

async fn load_catalog(client: &ApiClient, args: &MapArgs) -> Result<StarCatalog> {
    let source = catalog_source(
        args.catalog.as_deref(),
        args.origin.as_deref(),
        &client.config().catalog_url,
    )?;

    let catalog = match source {
        CatalogSource::Url(url) => StarCatalog::fetch(client, &url, Delimiter::Auto)
            .await
            .with_context(|| format!("failed to fetch catalog: {url}"))?,
        CatalogSource::Path(path) => StarCatalog::load_path(&path, Delimiter::Auto)
            .with_context(|| format!("failed to read catalog: {}", path.display()))?,
        CatalogSource::OnOrigin { origin, path } => {
            let client = client
                .clone()
                .with_origin(&origin)
                .with_context(|| format!("invalid origin: {origin}"))?;
            StarCatalog::fetch(&client, &path, Delimiter::Auto)
                .await
                .with_context(|| format!("failed to fetch catalog: {origin}{path}"))?
        }
    };

    Ok(match args.max_mag {
        Some(max_mag) => catalog.filter_by_magnitude(max_mag),
        None => catalog,
    })
}

async fn build_map(client: &ApiClient, args: &MapArgs, policy: HitPolicy) -> Result<StarMap> {
    let catalog = load_catalog(client, args).await?;

    let mut map = StarMap::new(StarMapConfig {
        surface: Surface::new(args.width, args.height),
        sample_size: args.sample,
        hit_policy: policy,
    });
    map.set_catalog(catalog.into_stars(), &mut StdRng::seed_from_u64(args.seed));
    Ok(map)
}

fn print_place(place: &Place) {
    println!("{}", place.display_name());
    println!("  {}", place.properties.formatted);
    if let Some(km) = place.distance_km() {
        println!("  Distance: {km}");
    }
    if !place.properties.categories.is_empty() {
        println!("  Categories: {}", place.properties.categories.join(", "));
    }
}

fn print_items(heading: &str, items: &[ListItem]) {
    println!("{heading}:");
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        if item.link.is_empty() {
            println!("  {}", item.title);
        } else {
            println!("  {}  <{}>", item.title, item.link);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => SiteConfig::from_env(),
    };
    let client = ApiClient::new(config)?;

    match cli.command {
        Commands::Render { map, output } => {
            let star_map = build_map(&client, &map, HitPolicy::FirstMatch).await?;
            star_map
                .renderer()
                .save_png(star_map.active(), &output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("{}", star_map.status_line());
            println!("Saved to {:?}", output);
        }

        Commands::Hit { map, x, y, nearest } => {
            let policy = if nearest { HitPolicy::Nearest } else { HitPolicy::FirstMatch };
            let mut star_map = build_map(&client, &map, policy).await?;

            star_map.pointer_move(x, y);
            match star_map.tooltip() {
                Some(tooltip) => {
                    println!("Tooltip at ({:.0}, {:.0}):", tooltip.x, tooltip.y);
                    for line in &tooltip.lines {
                        println!("  {line}");
                    }
                }
                None => println!("No star at ({x}, {y})"),
            }
        }

        Commands::Info { map, top } => {
            let star_map = build_map(&client, &map, HitPolicy::FirstMatch).await?;
            println!("{}", star_map.status_line());

            if let Some(b) = star_map.bounds() {
                println!("RA:  {:.2}h - {:.2}h", b.ra_min, b.ra_max);
                println!("Dec: {:.1}° - {:.1}°", b.dec_min, b.dec_max);
            }

            let brightest = StarCatalog::from_records(star_map.active().to_vec()).take_brightest(top);
            println!("\nBrightest:");
            for star in brightest.iter() {
                let constellation = star.display_constellation().unwrap_or("-");
                println!(
                    "  {:<20} {:>6.2}  RA {:>6.2}h  Dec {:>6.1}°  {}",
                    star.name, star.mag, star.ra, star.dec, constellation
                );
            }
        }

        Commands::Activity => {
            let lists = ActivityClient::new(&client).recent_interests().await?;
            print_items("Games", &lists.games);
            print_items("Songs", &lists.songs);
            print_items("Books", &lists.books);
        }

        Commands::Markets { search, tier, sort, limit } => {
            let prices = MarketClient::new(&client).top_markets().await?;
            let query = PriceQuery {
                search,
                tier: tier.into(),
                sort: sort.into(),
                limit,
            };
            let view = query.apply(&prices);

            println!("{}", view.summary());
            for price in &view.rows {
                match price.usd_value {
                    Some(v) => println!("  {:<8} ${:>14.6}", price.symbol, v),
                    None => println!("  {:<8} {:>15}", price.symbol, "n/a"),
                }
            }
        }

        Commands::Places { lat, lon, radius, categories } => {
            let places_client = PlacesClient::new(&client);
            let places = match &categories {
                Some(list) => {
                    let categories: Vec<&str> = list.split(',').map(str::trim).collect();
                    places_client.search(&categories, lon, lat, radius).await?
                }
                None => places_client.search_attractions(lon, lat, radius).await?,
            };

            if places.is_empty() {
                println!("No places within {} m", radius);
            }
            for place in &places {
                print_place(place);
            }
        }

        Commands::History { id, days } => {
            let points = MarketClient::new(&client).price_history(&id, days).await?;
            println!("{} over {} days: {} points", id, days, points.len());
            for point in &points {
                println!("  {:>14}  ${:.2}", point.timestamp_ms, point.price);
            }
        }

        Commands::Destinations { attractions, radius } => {
            let markers = LedgerClient::new(&client).locations().await;
            println!("Destinations: {}", markers.len());

            for marker in &markers {
                let c = marker.coordinates;
                println!("{}  ({:.4}, {:.4})", marker.description, c.latitude, c.longitude);
                if attractions {
                    let places = PlacesClient::new(&client)
                        .search_attractions(c.longitude, c.latitude, radius)
                        .await?;
                    for place in &places {
                        println!("  - {}", place.display_name());
                    }
                }
            }
        }
    }

    Ok(())
}
