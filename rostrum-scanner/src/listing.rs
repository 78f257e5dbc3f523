use crate::error::{Result, ScanError};
use crate::fetch::PageFetcher;
use crate::result::{
    CandidateEntry, CompletionReason, CrawlStatus, ListingCache, ListingCrawl, ListingPage,
};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// CSS selectors locating article headlines and the pagination link.
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    /// Each match is one article; its first `a[href]` descendant is the article URL.
    pub headline: String,
    pub next_page: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            headline: "h1.headline".to_string(),
            next_page: "a.next.page-numbers".to_string(),
        }
    }
}

struct CompiledSelectors {
    headline: Selector,
    link: Selector,
    next_page: Selector,
}

impl CompiledSelectors {
    fn compile(selectors: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            headline: parse_selector(&selectors.headline)?,
            link: parse_selector("a[href]")?,
            next_page: parse_selector(&selectors.next_page)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScanError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// The pagination link(s) found on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextLink {
    None,
    One(String),
    Many(usize),
}

/// Everything the crawler needs from one listing page.
#[derive(Debug, Clone)]
pub struct ParsedListing {
    pub entries: Vec<CandidateEntry>,
    pub next: NextLink,
}

/// Walks a paginated listing, collecting article entries page by page.
///
/// Pages are visited strictly one after another. A fetch failure stops the
/// walk but keeps everything collected up to that page.
pub struct ListingCrawler<F> {
    fetcher: F,
    selectors: CompiledSelectors,
    page_limit: Option<usize>,
    progress_callback: Option<ProgressCallback>,
}

impl<F: PageFetcher> ListingCrawler<F> {
    pub fn new(fetcher: F) -> Result<Self> {
        Ok(Self {
            fetcher,
            selectors: CompiledSelectors::compile(&ListingSelectors::default())?,
            page_limit: None,
            progress_callback: None,
        })
    }

    pub fn with_selectors(mut self, selectors: &ListingSelectors) -> Result<Self> {
        self.selectors = CompiledSelectors::compile(selectors)?;
        Ok(self)
    }

    /// Caps the number of pages fetched from the network per crawl. Cached
    /// pages are free. A limit of 0 means no limit.
    pub fn with_page_limit(mut self, limit: Option<usize>) -> Self {
        self.page_limit = limit.filter(|&n| n > 0);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Paginate forward from `start_url`.
    ///
    /// `seen` holds candidate URLs recorded by earlier runs: they are never
    /// returned, and the first page listing one of them is the last page
    /// visited. Newly fetched pages are appended to `cache`.
    pub async fn crawl(
        &self,
        start_url: &str,
        seen: &HashSet<String>,
        cache: &mut ListingCache,
    ) -> ListingCrawl {
        info!("Starting listing crawl at {}", start_url);
        match self.page_limit {
            Some(limit) => debug!("Limiting to {} new pages", limit),
            None => debug!("No limit to pages"),
        }

        let mut crawl = ListingCrawl::new();
        let mut emitted: HashSet<String> = HashSet::new();
        let mut page_url = start_url.to_string();

        loop {
            let html = match cache.get(&page_url) {
                Some(html) => {
                    debug!("Already fetched, using cached copy of {}", page_url);
                    html.to_string()
                }
                None => {
                    if self.page_limit.is_some_and(|limit| crawl.fetch_count >= limit) {
                        info!("Page limit reached before {}", page_url);
                        crawl.status = CrawlStatus::Completed(CompletionReason::PageLimit);
                        break;
                    }
                    match self.fetcher.fetch(&page_url).await {
                        Ok(html) => {
                            crawl.fetch_count += 1;
                            cache.insert(ListingPage {
                                url: page_url.clone(),
                                html: html.clone(),
                            });
                            html
                        }
                        Err(e) => {
                            error!("Received error at {}: {}", page_url, e);
                            crawl.status = CrawlStatus::Truncated {
                                url: page_url,
                                error: e.to_string(),
                            };
                            break;
                        }
                    }
                }
            };

            if let Some(ref callback) = self.progress_callback {
                callback(format!(
                    "Listing page {} ({} new articles)",
                    crawl.visited_pages.len() + 1,
                    crawl.new_candidates.len()
                ));
            }
            crawl.visited_pages.push(page_url.clone());

            let parsed = self.parse_page(&html, &page_url);
            let mut reached_seen = false;
            for entry in parsed.entries {
                if seen.contains(&entry.url) {
                    warn!("Skipping previously recorded {}: {}", entry.name, entry.url);
                    reached_seen = true;
                } else if emitted.insert(entry.url.clone()) {
                    debug!("Adding {}: {}", entry.name, entry.url);
                    crawl.new_candidates.push(entry);
                } else {
                    debug!("Duplicate entry {} on {}", entry.url, page_url);
                }
            }

            if reached_seen {
                debug!("Reached articles recorded by an earlier run at {}", page_url);
                crawl.status = CrawlStatus::Completed(CompletionReason::ReachedSeen);
                break;
            }

            match parsed.next {
                NextLink::None => {
                    debug!("No next page after {}", page_url);
                    crawl.status = CrawlStatus::Completed(CompletionReason::EndOfListing);
                    break;
                }
                NextLink::Many(matches) => {
                    error!("Encountered {} next-page links on {}", matches, page_url);
                    crawl.status = CrawlStatus::Ambiguous {
                        url: page_url,
                        matches,
                    };
                    break;
                }
                NextLink::One(next) => {
                    if crawl.visited_pages.contains(&next) {
                        warn!("Next page {} was already visited in this crawl", next);
                        crawl.status = CrawlStatus::Completed(CompletionReason::Revisited);
                        break;
                    }
                    debug!("Moving onto {}", next);
                    page_url = next;
                }
            }
        }

        info!(
            "Listing crawl stopped after {} pages ({} fetched, {} new articles): {:?}",
            crawl.visited_pages.len(),
            crawl.fetch_count,
            crawl.new_candidates.len(),
            crawl.status
        );
        crawl
    }

    /// Extract article entries and the pagination link from a listing page.
    pub fn parse_page(&self, html: &str, page_url: &str) -> ParsedListing {
        let document = Html::parse_document(html);

        let mut entries = Vec::new();
        for headline in document.select(&self.selectors.headline) {
            let name = headline.text().collect::<String>().trim().to_string();
            let href = headline
                .select(&self.selectors.link)
                .next()
                .and_then(|link| link.value().attr("href"));
            match href {
                Some(href) => entries.push(CandidateEntry::new(resolve_url(page_url, href), name)),
                None => warn!("Headline '{}' on {} has no link", name, page_url),
            }
        }

        let next_links: Vec<_> = document.select(&self.selectors.next_page).collect();
        let next = match next_links.as_slice() {
            [] => NextLink::None,
            [link] => match link.value().attr("href") {
                Some(href) => NextLink::One(resolve_url(page_url, href)),
                None => {
                    warn!("Next-page link on {} has no href", page_url);
                    NextLink::None
                }
            },
            links => NextLink::Many(links.len()),
        };

        ParsedListing { entries, next }
    }
}

/// Resolve `href` against the page it appeared on. Fragments are dropped.
/// Falls back to `href` untouched when either side does not parse.
fn resolve_url(base: &str, href: &str) -> String {
    Url::parse(base)
        .and_then(|base_url| base_url.join(href))
        .map(|mut url| {
            url.set_fragment(None);
            url.to_string()
        })
        .unwrap_or_else(|_| href.to_string())
}
