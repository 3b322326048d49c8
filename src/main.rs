//! areadict — search an area-code dictionary and resolve codes to their
//! forecast office.
//!
//! ```text
//! areadict search tokyo
//! areadict show 130010
//! areadict resolve 130010 -f json
//! areadict --source ./area.json --offline stats
//! ```

use anyhow::{bail, Context, Result};
use areadict::cache::{CacheStore, DirCache, MemoryCache};
use areadict::config;
use areadict::model::AreaIndex;
use areadict::query;
use areadict::render::{self, DetailView, ListView};
use areadict::resolve::resolve_office;
use areadict::source::{self, DictionaryLoader, LoadPolicy, Origin};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "areadict",
    version,
    about = "Search an area-code dictionary and resolve areas to their forecast office"
)]
struct Cli {
    /// Dictionary location: an http(s) URL or a local JSON file
    #[arg(long, global = true, env = "AREADICT_SOURCE", default_value = source::DEFAULT_SOURCE)]
    source: String,

    /// Directory holding the cached dictionary
    #[arg(long, global = true, env = "AREADICT_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Seconds a cached dictionary stays fresh
    #[arg(long, global = true, default_value_t = config::DEFAULT_TTL_SECS)]
    ttl: u64,

    /// Fetch timeout in seconds
    #[arg(long, global = true, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Fetch even when the cached copy is fresh
    #[arg(long, global = true, conflicts_with = "offline")]
    refresh: bool,

    /// Never fetch; use the cached copy however old
    #[arg(long, global = true)]
    offline: bool,

    /// Do not read or write the on-disk cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Output format: text (default), json, html
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: String,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List records whose code or name contains QUERY
    Search {
        query: Option<String>,

        /// Maximum results to show (0 for all)
        #[arg(short = 'n', long, default_value_t = config::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Show one record with its office resolution
    Show { code: String },
    /// Resolve a code to its office; exits 1 unless resolution succeeds
    Resolve { code: String },
    /// Record counts per category
    Stats,
    /// Inspect or clear the cached dictionary
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show where the cache lives and how old it is
    Status,
    /// Remove the cached dictionary
    Clear,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Search { query: text, limit } => {
            let index = load_index(&cli)?;
            let text = text.as_deref().unwrap_or_default();
            let view = ListView {
                query: text.to_string(),
                total: query::count_matches(&index, text),
                items: query::search(&index, text, *limit),
            };
            let renderer = render::create_renderer(&cli.format)?;
            print!("{}", renderer.render_list(&view));
        }
        Command::Show { code } => {
            let index = load_index(&cli)?;
            let Some(record) = index.get(code) else {
                bail!("area code not found: {}", code);
            };
            let renderer = render::create_renderer(&cli.format)?;
            print!("{}", renderer.render_detail(&DetailView::new(record, &index)));
        }
        Command::Resolve { code } => {
            let index = load_index(&cli)?;
            let resolution = resolve_office(Some(code.as_str()), &index);
            let steps = render::path_steps(&resolution, &index);
            let renderer = render::create_renderer(&cli.format)?;
            print!("{}", renderer.render_resolution(&resolution, &steps));
            if !resolution.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Stats => {
            let index = load_index(&cli)?;
            print_stats(&index);
        }
        Command::Cache { action } => cache_command(&cli, action)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cache_store(cli: &Cli) -> Box<dyn CacheStore> {
    if cli.no_cache {
        return Box::new(MemoryCache::default());
    }
    let dir = cli.cache_dir.clone().unwrap_or_else(config::default_cache_dir);
    Box::new(DirCache::new(&dir, &cli.source))
}

fn cache_ttl(cli: &Cli) -> Result<chrono::Duration> {
    i64::try_from(cli.ttl)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .context("--ttl is out of range")
}

fn load_index(cli: &Cli) -> Result<AreaIndex> {
    let fetcher = source::fetcher_for(&cli.source, std::time::Duration::from_secs(cli.timeout));
    let store = cache_store(cli);
    let policy = if cli.offline {
        LoadPolicy::Offline
    } else if cli.refresh {
        LoadPolicy::Refresh
    } else {
        LoadPolicy::Default
    };
    let ttl = cache_ttl(cli)?;

    let loaded = DictionaryLoader::new(fetcher.as_ref(), store.as_ref(), ttl)
        .policy(policy)
        .load_with_origin(Utc::now())
        .context("failed to load area dictionary")?;
    if loaded.origin == Origin::StaleCache {
        tracing::info!(saved_at = %loaded.saved_at, "using stale dictionary");
    }

    let index = areadict::build(&loaded.value);
    if index.is_empty() {
        tracing::warn!(source = %cli.source, "dictionary has no area records");
    }
    Ok(index)
}

fn print_stats(index: &AreaIndex) {
    for (group, count) in index.group_counts() {
        println!("{:<12} {}", group, count);
    }
    println!("{:<12} {}", "records", index.len());
    println!("{:<12} {}", "codes", index.code_count());
}

fn cache_command(cli: &Cli, action: &CacheAction) -> Result<()> {
    if cli.no_cache {
        bail!("--no-cache given; there is no cache to manage");
    }
    let store = cache_store(cli);
    match action {
        CacheAction::Status => {
            println!("location: {}", store.describe());
            match store.load().context("failed to read cache")? {
                Some(doc) => {
                    let now = Utc::now();
                    let ttl = cache_ttl(cli)?;
                    println!("saved at: {}", doc.saved_at.to_rfc3339());
                    println!("age:      {}s", doc.age(now).num_seconds());
                    println!(
                        "state:    {}",
                        if doc.is_fresh(now, ttl) { "fresh" } else { "stale" }
                    );
                }
                None => println!("state:    empty"),
            }
        }
        CacheAction::Clear => {
            store.clear().context("failed to clear cache")?;
            println!("cleared {}", store.describe());
        }
    }
    Ok(())
}
