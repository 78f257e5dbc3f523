use serde::{Deserialize, Serialize};

/// A listing page as fetched, kept so later runs can paginate without refetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    pub url: String,
    pub html: String,
}

/// An article discovered on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub url: String,
    pub name: String,
}

impl CandidateEntry {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// A downloaded article. `html` is `None` when the fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    pub url: String,
    pub name: String,
    pub html: Option<String>,
}

impl RawArticle {
    pub fn fetched(entry: &CandidateEntry, html: String) -> Self {
        Self {
            url: entry.url.clone(),
            name: entry.name.clone(),
            html: Some(html),
        }
    }

    pub fn failed(entry: &CandidateEntry) -> Self {
        Self {
            url: entry.url.clone(),
            name: entry.name.clone(),
            html: None,
        }
    }
}

/// Listing pages fetched so far, in visiting order.
///
/// `count` is the number of pages ever fetched into the cache and only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCache {
    pub pages: Vec<ListingPage>,
    #[serde(default)]
    pub count: usize,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|page| page.url == url)
            .map(|page| page.html.as_str())
    }

    pub fn insert(&mut self, page: ListingPage) {
        self.pages.push(page);
        self.count += 1;
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Why a crawl that did not fail stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// The last page had no "next" link.
    EndOfListing,
    /// A page listed an article recorded by an earlier run.
    ReachedSeen,
    /// The page limit was reached before the listing ended.
    PageLimit,
    /// The "next" link pointed back to a page already visited in this crawl.
    Revisited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlStatus {
    Completed(CompletionReason),
    /// A fetch failed; everything before `url` is kept.
    Truncated { url: String, error: String },
    /// More than one "next" link on `url`.
    Ambiguous { url: String, matches: usize },
}

impl CrawlStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, CrawlStatus::Completed(_))
    }
}

/// Outcome of one `ListingCrawler::crawl` call.
#[derive(Debug, Clone)]
pub struct ListingCrawl {
    /// Entries not seen by an earlier run, in listing order, unique by URL.
    pub new_candidates: Vec<CandidateEntry>,
    /// Listing pages paginated over in this call, in visiting order.
    pub visited_pages: Vec<String>,
    /// Pages fetched from the network (cache hits excluded).
    pub fetch_count: usize,
    pub status: CrawlStatus,
}

impl ListingCrawl {
    pub(crate) fn new() -> Self {
        Self {
            new_candidates: Vec::new(),
            visited_pages: Vec::new(),
            fetch_count: 0,
            status: CrawlStatus::Completed(CompletionReason::EndOfListing),
        }
    }
}
