use crate::data::{CandidateListFile, ListingCacheFile, load_json_or_default, save_json};
use crate::error::Result;
use crate::progress::{finish_spinner, spinner_callback, stage_spinner};
use rostrum_scanner::{CrawlStatus, HttpFetcher, ListingCrawler, ListingSelectors};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Options for the `update` stage.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub start_url: String,
    pub candidate_list: PathBuf,
    /// Where listing pages are cached between runs, if anywhere.
    pub page_cache: Option<PathBuf>,
    pub page_limit: Option<usize>,
    /// Ignore the existing candidate list and page cache.
    pub from_scratch: bool,
    pub strict: bool,
    pub selectors: ListingSelectors,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl UpdateOptions {
    pub fn new(start_url: impl Into<String>, candidate_list: impl Into<PathBuf>) -> Self {
        Self {
            start_url: start_url.into(),
            candidate_list: candidate_list.into(),
            page_cache: None,
            page_limit: None,
            from_scratch: false,
            strict: false,
            selectors: ListingSelectors::default(),
            timeout_secs: 30,
            show_progress_bars: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateSummary {
    pub new_candidates: usize,
    pub total_candidates: usize,
    /// Listing pages recorded in the candidate list after this run.
    pub result_pages: usize,
    pub first_page: Option<String>,
    pub last_page: Option<String>,
    pub fetch_count: usize,
    pub status: CrawlStatus,
}

/// Crawl the listing and append newly discovered articles to the candidate
/// list.
///
/// The candidate list (and page cache) are saved before a truncated or
/// ambiguous crawl is reported, so the next run resumes from them.
pub async fn execute_update(options: UpdateOptions) -> Result<UpdateSummary> {
    let UpdateOptions {
        start_url,
        candidate_list,
        page_cache,
        page_limit,
        from_scratch,
        strict,
        selectors,
        timeout_secs,
        show_progress_bars,
    } = options;

    let mut candidates: CandidateListFile = if from_scratch {
        CandidateListFile::default()
    } else {
        load_json_or_default(&candidate_list, strict)?
    };
    let mut cache_file: ListingCacheFile = match page_cache {
        Some(ref path) if !from_scratch => load_json_or_default(path, strict)?,
        _ => ListingCacheFile::default(),
    };

    let spinner = stage_spinner(show_progress_bars, "Crawling listing...");
    let mut crawler = ListingCrawler::new(HttpFetcher::with_timeout(timeout_secs)?)?
        .with_selectors(&selectors)?
        .with_page_limit(page_limit);
    if let Some(callback) = spinner_callback(&spinner) {
        crawler = crawler.with_progress_callback(callback);
    }

    let seen = candidates.seen_urls();
    let crawl = crawler.crawl(&start_url, &seen, &mut cache_file.cache).await;
    finish_spinner(
        &spinner,
        format!("Listing crawl done, {} pages", crawl.visited_pages.len()),
    );

    candidates.record_crawl(&crawl);
    save_json(&candidates, &candidate_list)?;
    if let Some(ref path) = page_cache {
        save_json(&cache_file, path)?;
    }

    info!("Found {} new URLs", crawl.new_candidates.len());
    if let (Some(first), Some(last)) = (crawl.visited_pages.first(), crawl.visited_pages.last()) {
        info!("First result page looked at: {}", first);
        info!("Last result page looked at: {}", last);
    }
    match crawl.status {
        CrawlStatus::Truncated { ref url, ref error } => {
            warn!("Crawl truncated at {}: {}", url, error)
        }
        CrawlStatus::Ambiguous { ref url, matches } => {
            error!("Crawl stopped at {}: {} next-page links", url, matches)
        }
        CrawlStatus::Completed(_) => {}
    }

    Ok(UpdateSummary {
        new_candidates: crawl.new_candidates.len(),
        total_candidates: candidates.transcripts.len(),
        result_pages: candidates.results.len(),
        first_page: crawl.visited_pages.first().cloned(),
        last_page: crawl.visited_pages.last().cloned(),
        fetch_count: crawl.fetch_count,
        status: crawl.status,
    })
}
