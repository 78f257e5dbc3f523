use crate::fetch::PageFetcher;
use crate::listing::ProgressCallback;
use crate::result::{CandidateEntry, RawArticle};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Lowercase, trim and drop empty keywords.
pub fn normalize_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// True when every keyword occurs in the lowercased `name`.
pub fn matches_keywords(name: &str, keywords: &[String]) -> bool {
    let name = name.to_lowercase();
    keywords.iter().all(|k| name.contains(&k.to_lowercase()))
}

/// Candidates that still need downloading, in input order.
///
/// A candidate is selected when its URL is not in `already_downloaded` and
/// its name contains every keyword. Repeated URLs are selected once.
pub fn select_candidates<'a>(
    candidates: &'a [CandidateEntry],
    keywords: &[String],
    already_downloaded: &HashSet<String>,
) -> Vec<&'a CandidateEntry> {
    let mut picked: HashSet<&str> = HashSet::new();
    candidates
        .iter()
        .filter(|c| !already_downloaded.contains(&c.url))
        .filter(|c| matches_keywords(&c.name, keywords))
        .filter(|&c| picked.insert(c.url.as_str()))
        .collect()
}

/// Fetches the article pages chosen by `select_candidates`.
pub struct ArticleDownloader<F> {
    fetcher: F,
    progress_callback: Option<ProgressCallback>,
}

impl<F: PageFetcher> ArticleDownloader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Download every selected candidate, one at a time.
    ///
    /// A failed fetch never aborts the batch: the article is returned with
    /// `html: None`.
    pub async fn download(
        &self,
        candidates: &[CandidateEntry],
        keywords: &[String],
        already_downloaded: &HashSet<String>,
    ) -> Vec<RawArticle> {
        for keyword in keywords {
            debug!("Filtering names by: {}", keyword);
        }
        let to_download = select_candidates(candidates, keywords, already_downloaded);
        info!("Number of articles to retrieve: {}", to_download.len());

        let total = to_download.len();
        let mut articles = Vec::with_capacity(total);
        for (idx, entry) in to_download.into_iter().enumerate() {
            if let Some(ref callback) = self.progress_callback {
                callback(format!("Downloading {}/{}: {}", idx + 1, total, entry.name));
            }

            match self.fetcher.fetch(&entry.url).await {
                Ok(html) => {
                    debug!("Downloaded {}", entry.url);
                    articles.push(RawArticle::fetched(entry, html));
                }
                Err(e) => {
                    warn!("Failed to download {} ({}): {}", entry.name, entry.url, e);
                    articles.push(RawArticle::failed(entry));
                }
            }
        }

        articles
    }
}
