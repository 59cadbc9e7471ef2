use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tmdb_router::{
    FileCache, Media, Router, RouterConfig, RouterError, SearchItem, SearchOptions,
};
use tracing_subscriber::EnvFilter;

/// Query the TMDB catalog through a local response cache
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TMDB API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Language tag sent with every request
    #[arg(long, default_value = tmdb_router::DEFAULT_LANGUAGE)]
    language: String,

    /// Cache directory (defaults to the system cache directory)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show movie details
    Movie { id: u64 },
    /// Show TV show details
    Tv { id: u64 },
    /// Show one season of a TV show
    Season { tv_id: u64, season_number: u32 },
    /// Search movies or TV shows
    Search {
        /// `movie` or `tv`
        kind: String,
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        include_adult: bool,
        /// First air date year (TV searches)
        #[arg(long)]
        year: Option<i32>,
        /// Fetch full details for every hit
        #[arg(long)]
        resolve: bool,
    },
    /// List genres
    Genres {
        kind: GenreKind,
        /// Rebuild the movie genre list even if one is cached
        #[arg(long)]
        no_cache: bool,
    },
    /// Show the image configuration
    Configuration,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GenreKind {
    Movie,
    Tv,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    page: u32,
    total_pages: u32,
    total_results: u64,
    results: &'a [SearchItem],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    resolved: Vec<Media>,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), RouterError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(RouterError::Mapping)?;
    println!("{rendered}");
    Ok(())
}

fn run(cli: Cli) -> Result<(), RouterError> {
    let config = RouterConfig::builder()
        .api_key(cli.api_key)
        .language(cli.language)
        .accept_invalid_certs(cli.insecure)
        .build()?;

    let cache = match cli.cache_dir {
        Some(dir) => FileCache::with_dir(dir)?,
        None => FileCache::open("responses")?,
    };
    tracing::debug!(cache_dir = %cache.cache_dir().display(), "using file cache");

    let router = Router::new(config, cache)?;

    match cli.command {
        Command::Movie { id } => print_json(&router.movie_by_id(id)?),
        Command::Tv { id } => print_json(&router.tv_show_by_id(id)?),
        Command::Season {
            tv_id,
            season_number,
        } => print_json(&router.season_details(tv_id, season_number)?),
        Command::Search {
            kind,
            query,
            page,
            include_adult,
            year,
            resolve,
        } => {
            let options = SearchOptions {
                page,
                include_adult,
                first_air_date_year: year,
            };
            let search = router.search(&kind, &query, &options)?;

            let resolved = if resolve {
                search
                    .hits()
                    .map(|hit| hit.resolve())
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                Vec::new()
            };

            print_json(&SearchOutput {
                page: search.page(),
                total_pages: search.total_pages(),
                total_results: search.total_results(),
                results: search.items(),
                resolved,
            })
        }
        Command::Genres { kind, no_cache } => {
            let genres = match kind {
                GenreKind::Movie => router.genres_movie(!no_cache)?,
                GenreKind::Tv => router.genres_tv_show()?,
            };
            print_json(&genres)
        }
        Command::Configuration => print_json(&router.configuration()?),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
