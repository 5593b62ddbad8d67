use std::fmt;
use std::time::Duration;

use anyhow::bail;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use pager_engine::{
    CachePolicy, LoaderSettings, LoaderTarget, LoaderView, MemoryBackend, OnQueryLoadListener,
    PagedLoader, QueryError,
};
use pager_logging::{pager_info, pager_warn};

const PAGE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct DemoRecord {
    pub id: usize,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for DemoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<4} {:<12} {}",
            self.id,
            self.title,
            self.created_at.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Newest first, the order a "created at, descending" query yields.
fn seed_records(count: usize) -> Vec<DemoRecord> {
    let now = Utc::now();
    (0..count)
        .map(|index| DemoRecord {
            id: count - index,
            title: format!("record {}", count - index),
            created_at: now - ChronoDuration::minutes(index as i64),
        })
        .collect()
}

/// Prints each new page as the loader appends it.
#[derive(Default)]
struct PrintingTarget {
    rows: Vec<DemoRecord>,
    printed: usize,
}

impl LoaderTarget<DemoRecord> for PrintingTarget {
    fn append_sublist(&mut self, items: &[DemoRecord]) {
        self.rows.extend_from_slice(items);
    }

    fn clear_list(&mut self) {
        self.rows.clear();
    }

    fn notify_data_changed(&mut self) {
        if self.rows.len() < self.printed {
            println!("-- list reset --");
            self.printed = 0;
        }
        for row in &self.rows[self.printed..] {
            println!("{row}");
        }
        self.printed = self.rows.len();
    }
}

struct LogListener;

impl OnQueryLoadListener<DemoRecord> for LogListener {
    fn on_loading(&mut self) {
        pager_info!("loading...");
    }

    fn on_loaded(
        &mut self,
        items: Option<&[DemoRecord]>,
        has_next_page: bool,
        error: Option<&QueryError>,
    ) {
        match error {
            Some(err) => pager_warn!("load finished with {}", err),
            None => pager_info!(
                "loaded {} records, more available: {}",
                items.map_or(0, <[DemoRecord]>::len),
                has_next_page
            ),
        }
    }
}

pub struct DemoOptions {
    pub settings: LoaderSettings,
    pub records: usize,
    pub latency_ms: u64,
    pub cache_policy: CachePolicy,
    pub max_pages: Option<usize>,
    pub reload: bool,
}

pub fn run(options: DemoOptions) -> anyhow::Result<()> {
    let backend = MemoryBackend::new(seed_records(options.records))
        .with_latency(Duration::from_millis(options.latency_ms))
        .with_cache_policy(options.cache_policy);

    let mut loader = PagedLoader::new(PrintingTarget::default(), &options.settings)?
        .with_query_factory(backend.factory());
    loader.add_on_query_load_listener(Box::new(LogListener));

    page_through(&mut loader, options.max_pages)?;
    print_summary(&loader.view());

    if options.reload {
        loader.set_has_next_page(true);
        loader.load_first_page();
        wait_for_page(&mut loader)?;
        print_summary(&loader.view());
    }
    Ok(())
}

/// Loads pages until the collection is exhausted, `max_pages` are in, or a
/// round leaves the cursor where it was (failure or cache miss). Returns the
/// number of pages loaded.
fn page_through<T, S>(
    loader: &mut PagedLoader<T, S>,
    max_pages: Option<usize>,
) -> anyhow::Result<usize>
where
    T: Clone + Send + 'static,
    S: LoaderTarget<T>,
{
    let loaded = |current: Option<usize>| current.map_or(0, |page| page + 1);

    loader.load_first_page();
    wait_for_page(loader)?;
    loop {
        let before = loader.current_page();
        if !loader.has_next_page() || max_pages.is_some_and(|max| loaded(before) >= max) {
            break;
        }
        loader.load_next_page();
        wait_for_page(loader)?;
        if loader.current_page() == before {
            pager_warn!("page {} did not load; stopping", loaded(before));
            break;
        }
    }
    Ok(loaded(loader.current_page()))
}

fn wait_for_page<T, S>(loader: &mut PagedLoader<T, S>) -> anyhow::Result<()>
where
    T: Clone + Send + 'static,
    S: LoaderTarget<T>,
{
    if !loader.wait_idle(PAGE_TIMEOUT) {
        bail!("no response within {:?}", PAGE_TIMEOUT);
    }
    Ok(())
}

fn print_summary(view: &LoaderView) {
    println!(
        "== {} records in {} pages (current page {:?}), more: {}",
        view.item_count, view.page_count, view.current_page, view.has_next_page
    );
    if view.show_next_page_item {
        println!("   [load more...]");
    }
}
