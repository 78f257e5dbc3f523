pub mod download;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod result;

pub use download::ArticleDownloader;
pub use error::ScanError;
pub use fetch::{HttpFetcher, PageFetcher};
pub use listing::{ListingCrawler, ListingSelectors, ProgressCallback};
pub use result::{
    CandidateEntry, CompletionReason, CrawlStatus, ListingCache, ListingCrawl, ListingPage,
    RawArticle,
};
