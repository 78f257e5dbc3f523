use crate::data::{CandidateListFile, RawArticlesFile, load_json, load_json_or_default, save_json};
use crate::error::Result;
use crate::merge::count_speeches;
use crate::progress::{finish_spinner, spinner_callback, stage_spinner};
use rostrum_scanner::download::{normalize_keywords, select_candidates};
use rostrum_scanner::{ArticleDownloader, HttpFetcher};
use std::path::PathBuf;
use tracing::info;

/// Options for the `retrieve` stage.
#[derive(Debug, Clone)]
pub struct RetrieveOptions {
    pub candidate_list: PathBuf,
    /// Every keyword must appear in an article's name for it to be downloaded.
    pub keywords: Vec<String>,
    pub raw_articles: PathBuf,
    pub strict: bool,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl RetrieveOptions {
    pub fn new(
        candidate_list: impl Into<PathBuf>,
        keywords: Vec<String>,
        raw_articles: impl Into<PathBuf>,
    ) -> Self {
        Self {
            candidate_list: candidate_list.into(),
            keywords,
            raw_articles: raw_articles.into(),
            strict: false,
            timeout_secs: 30,
            show_progress_bars: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieveSummary {
    pub selected: usize,
    pub speeches: usize,
    pub downloaded: usize,
    pub failed: usize,
    pub total_articles: usize,
}

/// Split a `keyword1,keyword2,...` argument.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    normalize_keywords(&raw.split(',').collect::<Vec<_>>())
}

/// Download matching candidates not yet in the raw articles file and append
/// them to it.
pub async fn execute_retrieve(options: RetrieveOptions) -> Result<RetrieveSummary> {
    let RetrieveOptions {
        candidate_list,
        keywords,
        raw_articles,
        strict,
        timeout_secs,
        show_progress_bars,
    } = options;

    let candidates: CandidateListFile = load_json(&candidate_list)?;
    info!("Number of transcript URLs: {}", candidates.transcripts.len());
    info!("Number of result pages seen: {}", candidates.results.len());
    let mut pages: RawArticlesFile = load_json_or_default(&raw_articles, strict)?;

    let keywords = normalize_keywords(&keywords);
    let downloaded = pages.downloaded_urls();
    let selected = select_candidates(&candidates.transcripts, &keywords, &downloaded);
    let speeches = count_speeches(selected.iter().map(|c| c.name.as_str()));
    info!("Number of speeches to retrieve: {}", speeches);

    let spinner = stage_spinner(show_progress_bars, "Downloading articles...");
    let mut downloader = ArticleDownloader::new(HttpFetcher::with_timeout(timeout_secs)?);
    if let Some(callback) = spinner_callback(&spinner) {
        downloader = downloader.with_progress_callback(callback);
    }
    let new_articles = downloader
        .download(&candidates.transcripts, &keywords, &downloaded)
        .await;
    finish_spinner(
        &spinner,
        format!("Downloaded {} articles", new_articles.len()),
    );

    let failed = new_articles.iter().filter(|a| a.html.is_none()).count();
    let summary = RetrieveSummary {
        selected: selected.len(),
        speeches,
        downloaded: new_articles.len() - failed,
        failed,
        total_articles: pages.transcripts.len() + new_articles.len(),
    };
    info!("New downloads: {}", new_articles.len());

    pages.transcripts.extend(new_articles);
    save_json(&pages, &raw_articles)?;

    Ok(summary)
}
