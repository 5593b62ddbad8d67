mod demo;
mod logging;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use pager_engine::{CachePolicy, LoaderSettings};

/// Page through an in-memory collection and print what the list receives.
#[derive(Debug, Parser)]
#[command(name = "pager_app", version)]
struct Cli {
    /// RON file with loader settings.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Overrides `objects_per_page` from the settings.
    #[arg(long)]
    page_size: Option<usize>,

    /// Number of records in the demo collection.
    #[arg(long, default_value_t = 60)]
    records: usize,

    /// Simulated backend latency in milliseconds.
    #[arg(long, default_value_t = 40)]
    latency_ms: u64,

    #[arg(long, value_enum, default_value_t = PolicyArg::IgnoreCache)]
    cache_policy: PolicyArg,

    /// Stop after this many pages.
    #[arg(long)]
    max_pages: Option<usize>,

    /// Reload from page 0 once the last page is in.
    #[arg(long)]
    reload: bool,

    #[arg(long, value_enum, default_value_t = LogArg::Terminal)]
    log: LogArg,

    /// Include debug-level loader logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    IgnoreCache,
    CacheOnly,
    NetworkOnly,
    CacheElseNetwork,
    NetworkElseCache,
    CacheThenNetwork,
}

impl From<PolicyArg> for CachePolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::IgnoreCache => CachePolicy::IgnoreCache,
            PolicyArg::CacheOnly => CachePolicy::CacheOnly,
            PolicyArg::NetworkOnly => CachePolicy::NetworkOnly,
            PolicyArg::CacheElseNetwork => CachePolicy::CacheElseNetwork,
            PolicyArg::NetworkElseCache => CachePolicy::NetworkElseCache,
            PolicyArg::CacheThenNetwork => CachePolicy::CacheThenNetwork,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogArg {
    File,
    Terminal,
    Both,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(
        match cli.log {
            LogArg::File => logging::LogDestination::File,
            LogArg::Terminal => logging::LogDestination::Terminal,
            LogArg::Both => logging::LogDestination::Both,
        },
        level,
    );

    let mut settings = match &cli.settings {
        Some(path) => LoaderSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => LoaderSettings::default(),
    };
    if let Some(page_size) = cli.page_size {
        settings.objects_per_page = page_size;
    }
    settings.validate().context("invalid loader settings")?;

    demo::run(demo::DemoOptions {
        settings,
        records: cli.records,
        latency_ms: cli.latency_ms,
        cache_policy: cli.cache_policy.into(),
        max_pages: cli.max_pages,
        reload: cli.reload,
    })
}
